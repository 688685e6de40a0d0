//! PSIONIC Simulation Core
//!
//! ECS-симуляция на Bevy 0.16 (strategic layer)
//!
//! HYBRID ARCHITECTURE:
//! - ECS = strategic layer (enemy AI, ability sequences, stats, combat rules)
//! - Движок = tactical layer (physics, rendering, pathfinding, animation, audio)
//!
//! ECS пишет intent (NavAgent, Animator, CapsuleCollider, events),
//! движок пишет input (PlayerInput, Transform) и feedback events (DamageReceived, ReloadSignal).

use bevy::ecs::schedule::ExecutorKind;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;
pub mod perception;
pub mod physics;
pub mod player;
pub mod timer;

// Re-export базовых компонентов для удобства
pub use ai::{enemy_bundle, AIPlugin, EnemyBehavior, EnemyConfig, EnemyState, Muzzle};
pub use combat::{
    ActorFlung, CombatPlugin, DamageReceived, EffectSpawned, EnemyDied, FlingDirection, Flingable,
    ProjectileSpawned, SoundCue, SoundRequested,
};
pub use components::*;
pub use config::{ConfigError, SimulationSettings};
pub use logger::{
    init_logger, log, log_error, log_info, log_level, log_warning, log_with_level, set_log_level,
    set_logger, set_logger_if_needed, ConsoleLogger, LogLevel, LogPrinter,
};
pub use perception::{GroundPatch, LayerMask, PerceptionService, RayHit, SpatialWorld};
pub use physics::HeadlessPhysicsPlugin;
pub use player::{
    player_bundle, AbilityController, DashStarted, Locomotion, LocomotionConfig, PlayerClass,
    PlayerDied, PlayerPlugin, PlayerStats, PlayerStatsConfig, ReloadPhase, ReloadSignal,
    ReloadState, SceneRestartRequested,
};
pub use timer::AbilityTimer;

/// Порядок внутри одного simulation tick'а (FixedUpdate)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Очистка animation requests, зеркало позиций в SpatialWorld
    Prepare,
    /// DamageReceived → Health, death transitions
    Damage,
    /// Enemy perception → FSM → behaviors
    Enemy,
    /// Abilities, reload, stats, death sequence, locomotion
    Player,
    /// Headless физика (только если подключен HeadlessPhysicsPlugin)
    Physics,
    /// Animator flag sync
    Late,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Если SimulationSettings уже вставлены — берёт из них tick rate и seed.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let settings = app
            .world()
            .get_resource::<SimulationSettings>()
            .cloned()
            .unwrap_or_default();

        // Детерминистичный RNG (seed из настроек, если не вставлен заранее)
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(settings.seed));
        }

        app
            // Fixed timestep 60Hz по умолчанию
            .insert_resource(Time::<Fixed>::from_hz(settings.tick_hz))
            .init_resource::<SpatialWorld>()
            .init_resource::<LockOnTarget>()
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Prepare,
                    SimulationSet::Damage,
                    SimulationSet::Enemy,
                    SimulationSet::Player,
                    SimulationSet::Physics,
                    SimulationSet::Late,
                )
                    .chain(),
            )
            .add_systems(
                FixedUpdate,
                (clear_animation_requests, perception::sync_spatial_world)
                    .chain()
                    .in_set(SimulationSet::Prepare),
            )
            // Подсистемы (ECS strategic layer)
            .add_plugins((CombatPlugin, AIPlugin, PlayerPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт headless App, который шагается вручную (`step_simulation`)
///
/// Без MinimalPlugins: время двигает только step_simulation,
/// FixedUpdate исполняется single-threaded для детерминизма.
/// Events живут два tick'а: step_simulation крутит First (event_update_system).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.init_resource::<Time>()
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);
    app.edit_schedule(FixedUpdate, |schedule| {
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    });

    app
}

/// Один simulation tick с фиксированным delta
///
/// First перед FixedUpdate, как в Main: event буферы свапаются,
/// непрочитанные events старше двух tick'ов выбрасываются.
pub fn step_simulation(app: &mut App, delta: Duration) {
    let world = app.world_mut();
    world.run_schedule(First);
    world.resource_mut::<Time>().advance_by(delta);
    world.run_schedule(FixedUpdate);
}

/// Snapshot мира для сравнения детерминизма
/// (упрощённая версия, через Debug)
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
