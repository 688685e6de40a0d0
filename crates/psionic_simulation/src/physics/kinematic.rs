//! Headless kinematic физика (замена движка в CLI и тестах)
//!
//! Архитектура:
//! - Движок в игре сам исполняет NavAgent/Locomotion/Flingable intent
//! - Headless: простая интеграция без коллизий между акторами
//! - Ground check через SpatialWorld raycast (те же ground patches, что у AI)
//!
//! Детерминизм: fixed timestep, никаких random/HashMap итераций.

use bevy::prelude::*;

use crate::combat::Flingable;
use crate::components::{Dead, NavAgent, PhysicsResponse};
use crate::perception::{LayerMask, PerceptionService, SpatialWorld};
use crate::player::Locomotion;
use crate::SimulationSet;

/// Ближе этого к destination — агент стоит
pub const NAV_STOPPING_DISTANCE: f32 = 0.05;
/// Луч ground check стартует чуть выше ступней
pub const GROUND_PROBE_OFFSET: f32 = 0.1;
/// Максимальная высота над землёй, при которой актор grounded
pub const GROUND_CHECK_DISTANCE: f32 = 0.3;
/// Fling impulse переводится в смещение за это время
pub const FLING_DISPLACEMENT_SECS: f32 = 0.1;

/// Один шаг движения к destination по XZ (высота не меняется)
pub fn step_toward(position: Vec3, destination: Vec3, speed: f32, delta_secs: f32) -> Vec3 {
    let mut offset = destination - position;
    offset.y = 0.0;

    let distance = offset.length();
    if distance <= NAV_STOPPING_DISTANCE {
        return position;
    }

    let step = (speed.max(0.0) * delta_secs).min(distance);
    position + offset / distance * step
}

/// Система: NavAgent path following (прямая линия, без navmesh)
pub fn follow_nav_agents(
    time: Res<Time>,
    mut agents: Query<(&NavAgent, &mut Transform), Without<Dead>>,
) {
    let delta = time.delta_secs();

    for (nav, mut transform) in agents.iter_mut() {
        if !nav.enabled {
            continue;
        }
        let Some(destination) = nav.destination else {
            continue;
        };

        let next = step_toward(transform.translation, destination, nav.speed, delta);
        if next != transform.translation {
            transform.translation = next;
        }
    }
}

/// Система: Locomotion.velocity → Transform (kinematic тела не двигаем)
pub fn integrate_locomotion(
    time: Res<Time>,
    mut bodies: Query<(&Locomotion, &mut Transform, Option<&PhysicsResponse>)>,
) {
    let delta = time.delta_secs();

    for (locomotion, mut transform, physics) in bodies.iter_mut() {
        if physics.is_some_and(|p| p.kinematic) {
            continue;
        }
        if locomotion.velocity != Vec3::ZERO {
            transform.translation += locomotion.velocity * delta;
        }
    }
}

/// Система: применяем накопленные fling impulses
pub fn apply_fling_impulses(mut bodies: Query<(&mut Flingable, &mut Transform)>) {
    for (mut flingable, mut transform) in bodies.iter_mut() {
        if flingable.pending_impulse == Vec3::ZERO {
            continue;
        }

        let impulse = flingable.take_impulse();
        transform.translation += impulse * FLING_DISPLACEMENT_SECS;
    }
}

/// Система: ground detection через raycast вниз по ground layer
pub fn detect_ground(
    spatial: Res<SpatialWorld>,
    mut bodies: Query<(&Transform, &mut Locomotion)>,
) {
    for (transform, mut locomotion) in bodies.iter_mut() {
        let origin = transform.translation + Vec3::Y * GROUND_PROBE_OFFSET;
        let grounded = spatial
            .raycast(
                origin,
                Vec3::NEG_Y,
                GROUND_PROBE_OFFSET + GROUND_CHECK_DISTANCE,
                LayerMask::GROUND,
            )
            .is_some();

        if locomotion.is_grounded != grounded {
            locomotion.is_grounded = grounded;
        }
    }
}

/// Plugin headless физики
///
/// Регистрирует системы в FixedUpdate (SimulationSet::Physics) для детерминизма.
/// В игре не подключается — intent исполняет движок.
pub struct HeadlessPhysicsPlugin;

impl Plugin for HeadlessPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                follow_nav_agents,
                integrate_locomotion,
                apply_fling_impulses,
                detect_ground,
            )
                .chain() // Последовательное выполнение
                .in_set(SimulationSet::Physics),
        );
    }
}
