//! Headless симуляция PSIONIC
//!
//! Запускает Bevy App без рендера: арена, игрок, кольцо врагов.
//! Физику заменяет HeadlessPhysicsPlugin.

use std::path::PathBuf;
use std::process::ExitCode;

use bevy::prelude::*;
use clap::Parser;

use psionic_simulation::{
    create_headless_app, enemy_bundle, init_logger, log_error, log_info, player_bundle, set_log_level,
    step_simulation, ConfigError, EnemyBehavior, EnemyState, GroundPatch, Health,
    HeadlessPhysicsPlugin, PlayerClass, ProjectileSpawned, SimulationSettings, SpatialWorld,
};

#[derive(Parser, Debug)]
#[command(name = "psionic_simulation", about = "Headless PSIONIC simulation")]
struct Cli {
    /// Seed DeterministicRng (перекрывает settings)
    #[arg(long)]
    seed: Option<u64>,

    /// Количество simulation tick'ов
    #[arg(long, default_value_t = 1000)]
    ticks: u32,

    /// RON файл с SimulationSettings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Количество врагов на арене
    #[arg(long, default_value_t = 4)]
    enemies: u32,

    /// Радиус кольца врагов вокруг игрока
    #[arg(long, default_value_t = 8.0)]
    ring_radius: f32,
}

fn load_settings(cli: &Cli) -> Result<SimulationSettings, ConfigError> {
    let mut settings = match &cli.config {
        Some(path) => SimulationSettings::load(path)?,
        None => SimulationSettings::default(),
    };

    if let Some(seed) = cli.seed {
        settings.seed = seed;
    }

    Ok(settings)
}

fn build_arena(app: &mut App, settings: &SimulationSettings, cli: &Cli) {
    let world = app.world_mut();

    // Одна плоская площадка, с запасом под leash/patrol
    let half_extent = cli.ring_radius + settings.enemy.leash_radius + settings.enemy.walk_point_range;
    world
        .resource_mut::<SpatialWorld>()
        .add_ground(GroundPatch::square(Vec3::ZERO, half_extent));

    world.spawn(player_bundle(
        Vec3::ZERO,
        PlayerClass::Psionic,
        &settings.player,
        settings.locomotion,
    ));

    for index in 0..cli.enemies {
        let angle = index as f32 / cli.enemies.max(1) as f32 * std::f32::consts::TAU;
        let position = Vec3::new(angle.cos(), 0.0, angle.sin()) * cli.ring_radius;
        world.spawn(enemy_bundle(position, settings.enemy.clone()));
    }
}

fn report(app: &mut App, tick: u32, shots: usize) {
    let world = app.world_mut();

    let mut enemies = world.query::<&EnemyBehavior>();
    let (mut patrol, mut chase, mut attack) = (0, 0, 0);
    for behavior in enemies.iter(world) {
        match behavior.state {
            EnemyState::Patrol => patrol += 1,
            EnemyState::Chase => chase += 1,
            EnemyState::Attack => attack += 1,
        }
    }

    let mut healths = world.query::<&Health>();
    let alive = healths.iter(world).filter(|health| health.is_alive()).count();

    log_info(&format!(
        "Tick {}: {} actors alive, enemies patrol/chase/attack = {}/{}/{}, shots = {}",
        tick, alive, patrol, chase, attack, shots
    ));
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger();

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(error) => {
            log_error(&format!("{}", error));
            return ExitCode::FAILURE;
        }
    };

    set_log_level(settings.log_level);
    log_info(&format!(
        "Starting PSIONIC headless simulation (seed: {}, {} Hz, {} ticks)",
        settings.seed, settings.tick_hz, cli.ticks
    ));

    let tick = settings.tick_duration();
    let mut app = create_headless_app(settings.seed);
    app.insert_resource(settings.clone())
        .add_plugins(HeadlessPhysicsPlugin);

    build_arena(&mut app, &settings, &cli);

    let mut shots = 0;
    for index in 0..cli.ticks {
        step_simulation(&mut app, tick);

        // Выстрелы движок бы превратил в projectiles, здесь просто считаем
        shots += app
            .world_mut()
            .resource_mut::<Events<ProjectileSpawned>>()
            .drain()
            .count();

        if index % 100 == 0 {
            report(&mut app, index, shots);
        }
    }

    log_info("Simulation complete!");
    ExitCode::SUCCESS
}
