//! Physics simulation module
//!
//! Headless kinematic интеграция intent-компонентов (NavAgent, Locomotion, Flingable).
//! В игре физику исполняет движок, этот модуль нужен CLI и тестам.

pub mod kinematic;

// Re-export основных типов
pub use kinematic::{
    apply_fling_impulses, detect_ground, follow_nav_agents, integrate_locomotion, step_toward,
    HeadlessPhysicsPlugin,
};
