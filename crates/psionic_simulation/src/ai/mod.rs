//! Enemy AI module
//!
//! Patrol/Chase/Attack FSM поверх perception snapshot'а.
//! ECS решает что делать (destination, speed, выстрел),
//! движок исполняет (pathfinding, анимация, projectile physics).

use bevy::prelude::*;

pub mod components;
pub mod systems;

// Re-export основных типов
pub use components::*;
pub use systems::{
    attack, chase, execute_enemy_behaviors, facing_rotation, init_enemy_spawn_points, patrol,
    refresh_enemy_perception, sample_walk_point, select_enemy_states, sense_player,
    tick_attack_cooldowns, AttackAttempt, ShotSolution,
};

use crate::SimulationSet;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate (SimulationSet::Enemy) для детерминизма.
/// Порядок выполнения:
/// 1. init_enemy_spawn_points — spawn point новых врагов
/// 2. refresh_enemy_perception — sight/attack sphere checks + aim layer blend
/// 3. select_enemy_states — Patrol/Chase/Attack из snapshot'а
/// 4. tick_attack_cooldowns — истечение cooldown'ов
/// 5. execute_enemy_behaviors — destination/speed/выстрелы
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                init_enemy_spawn_points,
                refresh_enemy_perception,
                select_enemy_states,
                tick_attack_cooldowns,
                execute_enemy_behaviors,
            )
                .chain() // Последовательное выполнение для детерминизма
                .in_set(SimulationSet::Enemy),
        );
    }
}
