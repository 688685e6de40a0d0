//! Player module: locomotion, abilities, stats, death
//!
//! ECS ответственность:
//! - camera-relative steering (velocity intent)
//! - ability sequences (dash, push/pull)
//! - stats bookkeeping (special, level, ammo), death transition
//!
//! Движок ответственность:
//! - input polling → PlayerInput
//! - physics/root motion, animation playback
//! - reload animation events → ReloadSignal

use bevy::prelude::*;

pub mod abilities;
pub mod death;
pub mod locomotion;
pub mod stats;

// Re-export основных типов
pub use abilities::{
    advance_ability_sequences, handle_ability_input, AbilityBehavior, AbilityContext,
    AbilityController, AbilityKind, AbilityPhase, AbilitySequence, AbilityStep, PlayerClass,
    Psionic,
};
pub use death::{advance_death_sequences, apply_player_damage, DeathSequence, DeathStep};
pub use locomotion::{steer, steer_players, sync_animator_flags, Locomotion, LocomotionConfig};
pub use stats::{
    apply_reload_signals, handle_reload, level_up_players, regenerate_special, PlayerStats,
    PlayerStatsConfig, ReloadState,
};

use crate::components::{
    Actor, Animator, CapsuleCollider, Health, PerceptionLayer, PhysicsResponse, Player,
    PlayerInput, PlayerTarget,
};
use crate::SimulationSet;

// ============================================================================
// Events
// ============================================================================

/// Event: игрок начал dash (движок может добавить VFX/звук)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DashStarted {
    pub actor: Entity,
    pub direction: Vec3,
}

/// Event: "You Died" (через 5с после смерти)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PlayerDied {
    pub entity: Entity,
}

/// Event: игрок удалён, движок перезагружает сцену
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SceneRestartRequested {
    pub despawned: Entity,
}

/// Фаза перезарядки (animation events движка)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadPhase {
    Started,
    Finished,
}

/// Event: движок → ECS, перезарядка началась/закончилась
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ReloadSignal {
    pub actor: Entity,
    pub phase: ReloadPhase,
}

// ============================================================================
// Spawn
// ============================================================================

/// Стандартный набор компонентов игрока
///
/// Игрок одновременно PlayerTarget (враги преследуют его самого).
pub fn player_bundle(
    position: Vec3,
    class: PlayerClass,
    stats: &PlayerStatsConfig,
    locomotion: LocomotionConfig,
) -> impl Bundle {
    (
        (
            Actor,
            Player,
            PlayerTarget,
            Transform::from_translation(position),
            Health::new(stats.starting_health),
            PerceptionLayer::player(),
            Animator::with_layers(3),
        ),
        (
            PlayerInput::default(),
            AbilityController::new(class),
            PlayerStats::from_config(stats),
            ReloadState::default(),
            CapsuleCollider::default(),
            PhysicsResponse::default(),
            Locomotion::default(),
            locomotion,
        ),
    )
}

// ============================================================================
// Plugin
// ============================================================================

/// Player Plugin
///
/// Damage intake — в SimulationSet::Damage.
/// Порядок в SimulationSet::Player:
/// 1. advance_ability_sequences — continuation сработавших таймеров
/// 2. handle_ability_input — edge-triggered старт новых sequences
/// 3. apply_reload_signals → handle_reload
/// 4. regenerate_special → level_up_players
/// 5. advance_death_sequences
/// 6. steer_players
///
/// sync_animator_flags — в SimulationSet::Late.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DashStarted>()
            .add_event::<PlayerDied>()
            .add_event::<SceneRestartRequested>()
            .add_event::<ReloadSignal>();

        app.add_systems(FixedUpdate, apply_player_damage.in_set(SimulationSet::Damage));

        app.add_systems(
            FixedUpdate,
            (
                advance_ability_sequences,
                handle_ability_input,
                apply_reload_signals,
                handle_reload,
                regenerate_special,
                level_up_players,
                advance_death_sequences,
                steer_players,
            )
                .chain()
                .in_set(SimulationSet::Player),
        );

        app.add_systems(FixedUpdate, sync_animator_flags.in_set(SimulationSet::Late));
    }
}
