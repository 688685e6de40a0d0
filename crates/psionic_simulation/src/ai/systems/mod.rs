//! AI systems (strategic layer logic)

pub mod behavior;
pub mod fsm;
pub mod perception;

#[cfg(test)]
mod behavior_tests;

// Re-export all systems
pub use behavior::*;
pub use fsm::*;
pub use perception::*;
