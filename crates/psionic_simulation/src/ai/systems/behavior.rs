//! Enemy state behaviors: Patrol / Chase / Attack
//!
//! Логика написана против capability traits (PerceptionService, NavigationAgent,
//! AnimationDriver), ECS система только собирает данные и пишет events.

use bevy::prelude::*;
use rand::Rng;

use crate::ai::{AttackCooldown, EnemyBehavior, EnemyConfig, EnemyState, Muzzle};
use crate::combat::{EffectKind, EffectSpawned, ProjectileSpawned, SoundCue, SoundRequested};
use crate::components::{
    AnimationDriver, Animator, Dead, NavAgent, NavigationAgent, PlayerTarget, MOVING_AMOUNT,
};
use crate::perception::{LayerMask, PerceptionService, SpatialWorld};
use crate::timer::secs;
use crate::DeterministicRng;

/// Параметры выстрела (muzzle pose + направление на цель)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotSolution {
    pub origin: Vec3,
    pub direction: Vec3,
    pub rotation: Quat,
}

/// Результат tick'а в Attack
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackAttempt {
    /// Cooldown активен — попытки не было
    OnCooldown,
    /// Попытка была, но aim layer не готов (cooldown всё равно взведён)
    NotReady,
    Fired(ShotSolution),
}

/// Одна попытка найти патрульную точку
///
/// Random offset по z, затем по x в [-walk_point_range, walk_point_range],
/// y не меняется. Принимается только если под точкой есть земля
/// (луч вниз длиной ground_probe_length) и она в пределах leash от spawn point.
pub fn sample_walk_point<P: PerceptionService + ?Sized, R: Rng + ?Sized>(
    perception: &P,
    rng: &mut R,
    position: Vec3,
    spawn_point: Vec3,
    config: &EnemyConfig,
) -> Option<Vec3> {
    let range = config.walk_point_range.abs();
    if !range.is_finite() {
        return None;
    }
    let offset_z = rng.gen_range(-range..=range);
    let offset_x = rng.gen_range(-range..=range);
    let candidate = Vec3::new(position.x + offset_x, position.y, position.z + offset_z);

    let grounded = perception
        .raycast(candidate, Vec3::NEG_Y, config.ground_probe_length, LayerMask::GROUND)
        .is_some();
    let leashed = spawn_point.distance(candidate) <= config.leash_radius;

    (grounded && leashed).then_some(candidate)
}

/// Patrol: шагом к патрульной точке, новая точка после прибытия
#[allow(clippy::too_many_arguments)]
pub fn patrol<P, R, N, A>(
    perception: &P,
    rng: &mut R,
    nav: &mut N,
    animator: &mut A,
    position: Vec3,
    behavior: &mut EnemyBehavior,
    config: &EnemyConfig,
) where
    P: PerceptionService + ?Sized,
    R: Rng + ?Sized,
    N: NavigationAgent,
    A: AnimationDriver,
{
    animator.set_float(MOVING_AMOUNT, 0.5);
    nav.set_speed(config.walk_speed);

    let spawn_point = behavior.spawn_point.unwrap_or(position);

    if !behavior.walk_point.valid {
        if let Some(point) = sample_walk_point(perception, rng, position, spawn_point, config) {
            behavior.walk_point.set(point);
        }
    }

    if behavior.walk_point.valid {
        nav.set_destination(behavior.walk_point.position);

        if position.distance(behavior.walk_point.position) < config.arrival_radius {
            behavior.walk_point.invalidate();
        }
    }
}

/// Chase: бегом к live позиции цели
pub fn chase<N: NavigationAgent, A: AnimationDriver>(
    nav: &mut N,
    animator: &mut A,
    target: Vec3,
    config: &EnemyConfig,
) {
    animator.set_float(MOVING_AMOUNT, 1.0);
    nav.set_speed(config.chase_speed);
    nav.set_destination(target);
}

/// Rotation "смотреть на target" в горизонтальной плоскости
///
/// Offset normalize, затем y = 0. Если цель ровно над/под врагом
/// (горизонтальная часть ~0) — сохраняем текущий forward.
pub fn facing_rotation(transform: &Transform, target: Vec3) -> Quat {
    let mut direction = (target - transform.translation).normalize_or_zero();
    direction.y = 0.0;

    if direction.length_squared() < 1e-6 {
        direction = transform.forward().as_vec3();
        direction.y = 0.0;
        if direction.length_squared() < 1e-6 {
            return transform.rotation;
        }
    }

    Transform::IDENTITY.looking_to(direction, Vec3::Y).rotation
}

/// Attack: стоим, поворачиваемся к цели, стреляем если cooldown свободен
///
/// Каждая свежая попытка взводит cooldown — даже когда aim layer
/// ещё не набрал вес и выстрела не было.
#[allow(clippy::too_many_arguments)]
pub fn attack<N: NavigationAgent, A: AnimationDriver>(
    nav: &mut N,
    animator: &mut A,
    transform: &mut Transform,
    cooldown: &mut AttackCooldown,
    muzzle: &Muzzle,
    target: Vec3,
    config: &EnemyConfig,
    delta_secs: f32,
) -> AttackAttempt {
    nav.set_destination(transform.translation);
    animator.set_float(MOVING_AMOUNT, 0.0);

    let desired = facing_rotation(transform, target);
    let factor = (config.turn_rate * delta_secs).clamp(0.0, 1.0);
    transform.rotation = transform.rotation.slerp(desired, factor);

    if cooldown.is_active() {
        return AttackAttempt::OnCooldown;
    }
    cooldown.arm(secs(config.time_between_attacks));

    if animator.layer_weight(config.aim_layer) < config.aim_threshold {
        return AttackAttempt::NotReady;
    }

    // Muzzle считается после поворота этого tick'а
    let origin = muzzle.world_position(transform);
    let mut direction = (target - origin).normalize_or_zero();
    if direction == Vec3::ZERO {
        direction = transform.forward().as_vec3();
    }
    let rotation = Transform::IDENTITY.looking_to(direction, Vec3::Y).rotation;

    AttackAttempt::Fired(ShotSolution {
        origin,
        direction,
        rotation,
    })
}

/// Система: cooldown tick (до behaviors, чтобы освободившийся cooldown
/// сразу давал свежую попытку)
pub fn tick_attack_cooldowns(time: Res<Time>, mut enemies: Query<&mut EnemyBehavior>) {
    let delta = time.delta();

    for mut behavior in enemies.iter_mut() {
        if behavior.cooldown.is_active() {
            behavior.cooldown.tick(delta);
        }
    }
}

/// Система: исполнение поведения текущего состояния
///
/// Только для врагов с включённым NavAgent. Без PlayerTarget
/// Chase/Attack пропускаются (цель ищется снова в следующем tick'е).
#[allow(clippy::too_many_arguments)]
pub fn execute_enemy_behaviors(
    time: Res<Time>,
    spatial: Res<SpatialWorld>,
    mut rng: ResMut<DeterministicRng>,
    targets: Query<&Transform, (With<PlayerTarget>, Without<EnemyBehavior>)>,
    mut enemies: Query<
        (
            Entity,
            &mut Transform,
            &mut EnemyBehavior,
            &mut NavAgent,
            &mut Animator,
            &EnemyConfig,
            &Muzzle,
        ),
        Without<Dead>,
    >,
    mut effects: EventWriter<EffectSpawned>,
    mut sounds: EventWriter<SoundRequested>,
    mut projectiles: EventWriter<ProjectileSpawned>,
) {
    let delta = time.delta_secs();
    let target = targets.iter().next().map(|transform| transform.translation);

    for (entity, mut transform, mut behavior, mut nav, mut animator, config, muzzle) in
        enemies.iter_mut()
    {
        if !nav.is_enabled() {
            continue;
        }

        match behavior.state {
            EnemyState::Patrol => {
                let position = transform.translation;
                patrol(
                    &*spatial,
                    &mut rng.rng,
                    &mut *nav,
                    &mut *animator,
                    position,
                    &mut behavior,
                    config,
                );
            }
            EnemyState::Chase => {
                let Some(target) = target else {
                    continue;
                };
                chase(&mut *nav, &mut *animator, target, config);
            }
            EnemyState::Attack => {
                let Some(target) = target else {
                    continue;
                };

                let attempt = attack(
                    &mut *nav,
                    &mut *animator,
                    &mut transform,
                    &mut behavior.cooldown,
                    muzzle,
                    target,
                    config,
                    delta,
                );

                match attempt {
                    AttackAttempt::Fired(shot) => {
                        effects.write(EffectSpawned {
                            source: entity,
                            effect: EffectKind::MuzzleFlash,
                            position: shot.origin,
                            rotation: shot.rotation,
                        });
                        sounds.write(SoundRequested {
                            source: entity,
                            cue: SoundCue::EnemyShot,
                        });
                        projectiles.write(ProjectileSpawned {
                            shooter: entity,
                            origin: shot.origin,
                            direction: shot.direction,
                            rotation: shot.rotation,
                            speed: config.projectile_speed,
                        });

                        crate::log(&format!(
                            "🔫 Enemy {:?} fired at {:?} (dir {:?})",
                            entity, target, shot.direction
                        ));
                    }
                    AttackAttempt::NotReady => {
                        crate::log(&format!(
                            "Enemy {:?} attack attempt: aim not ready ({:.2})",
                            entity,
                            animator.layer_weight(config.aim_layer)
                        ));
                    }
                    AttackAttempt::OnCooldown => {}
                }
            }
        }
    }
}
