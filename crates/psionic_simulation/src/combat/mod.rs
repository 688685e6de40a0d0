//! Combat module (engine-driven combat architecture)
//!
//! ECS ответственность:
//! - Game state: Health, Flingable impulses
//! - Combat rules: урон, смерть врагов
//! - Events: ProjectileSpawned, EffectSpawned, SoundRequested, ActorFlung
//!
//! Движок ответственность:
//! - Projectile physics, collision detection → DamageReceived
//! - VFX/SFX playback по intent events

use bevy::prelude::*;

pub mod damage;
pub mod events;
pub mod flingable;

// Re-export основных типов
pub use damage::{apply_enemy_damage, resisted_damage};
pub use events::{
    ActorFlung, DamageReceived, EffectKind, EffectSpawned, EnemyDied, FlingDirection,
    ProjectileSpawned, SoundCue, SoundRequested,
};
pub use flingable::Flingable;

use crate::SimulationSet;

/// Combat Plugin
///
/// Регистрирует combat events и damage intake врагов (SimulationSet::Damage).
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DamageReceived>()
            .add_event::<EnemyDied>()
            .add_event::<ProjectileSpawned>()
            .add_event::<EffectSpawned>()
            .add_event::<SoundRequested>()
            .add_event::<ActorFlung>();

        app.add_systems(FixedUpdate, apply_enemy_damage.in_set(SimulationSet::Damage));
    }
}
