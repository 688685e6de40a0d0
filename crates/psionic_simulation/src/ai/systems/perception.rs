//! Enemy perception: sphere checks против слоя игрока + aim layer blend

use bevy::prelude::*;

use crate::ai::{EnemyBehavior, EnemyConfig, PerceptionSnapshot};
use crate::components::{AnimationDriver, Animator, Dead, Health};
use crate::perception::{LayerMask, PerceptionService, SpatialWorld};

/// Snapshot из двух sphere checks (sight, attack) вокруг врага
pub fn sense_player<P: PerceptionService + ?Sized>(
    perception: &P,
    position: Vec3,
    config: &EnemyConfig,
) -> PerceptionSnapshot {
    PerceptionSnapshot {
        in_sight_range: perception.check_sphere(position, config.sight_range, LayerMask::PLAYER),
        in_attack_range: perception.check_sphere(position, config.attack_range, LayerMask::PLAYER),
    }
}

/// Новый вес aim layer: lerp к target с фактором clamp(rate · dt)
pub fn blend_aim_weight(current: f32, aiming: bool, rate: f32, delta_secs: f32) -> f32 {
    let target = if aiming { 1.0 } else { 0.0 };
    let factor = (rate * delta_secs).clamp(0.0, 1.0);
    current + (target - current) * factor
}

/// Система: фиксирует spawn point при первом появлении врага
pub fn init_enemy_spawn_points(
    mut enemies: Query<(&Transform, &mut EnemyBehavior), Added<EnemyBehavior>>,
) {
    for (transform, mut behavior) in enemies.iter_mut() {
        if behavior.spawn_point.is_none() {
            behavior.spawn_point = Some(transform.translation);
        }
    }
}

/// Система: perception refresh + aim blend (каждый tick, независимо от состояния)
///
/// Aim target = 1 только если враг жив и игрок в attack range.
pub fn refresh_enemy_perception(
    time: Res<Time>,
    spatial: Res<SpatialWorld>,
    mut enemies: Query<(
        &Transform,
        &EnemyConfig,
        &Health,
        Has<Dead>,
        &mut EnemyBehavior,
        &mut Animator,
    )>,
) {
    let delta = time.delta_secs();

    for (transform, config, health, is_dead, mut behavior, mut animator) in enemies.iter_mut() {
        let snapshot = sense_player(&*spatial, transform.translation, config);
        if behavior.perception != snapshot {
            behavior.perception = snapshot;
        }

        let alive = health.is_alive() && !is_dead;
        let current = animator.layer_weight(config.aim_layer);
        let weight = blend_aim_weight(
            current,
            alive && snapshot.in_attack_range,
            config.aim_blend_rate,
            delta,
        );
        animator.set_layer_weight(config.aim_layer, weight);
    }
}
