//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовые характеристики (Actor, Health, Dead, CapsuleCollider)
//! - navigation: NavigationAgent capability + NavAgent intent
//! - animation: AnimationDriver capability + Animator intent
//! - world: присутствие в spatial mirror (PerceptionLayer)
//! - player: player control (Player, PlayerTarget, PlayerInput, lock-on)
//! - camera: MainCamera + camera-relative basis

pub mod actor;
pub mod animation;
pub mod camera;
pub mod navigation;
pub mod player;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use animation::*;
pub use camera::*;
pub use navigation::*;
pub use player::*;
pub use world::*;
