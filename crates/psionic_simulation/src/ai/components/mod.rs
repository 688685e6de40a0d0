//! AI components module.

pub mod enemy;

#[cfg(test)]
mod enemy_tests;

// Re-export all public items
pub use enemy::*;
