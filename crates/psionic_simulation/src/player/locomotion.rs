//! Player locomotion: camera-relative steering + rotation
//!
//! ECS считает velocity (intent), физика движка её применяет.
//! В headless режиме velocity интегрирует HeadlessPhysicsPlugin.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::{
    AnimationDriver, Animator, CameraBasis, Dead, MainCamera, Player, PlayerInput, IS_GROUNDED,
    IS_INTERACTING, IS_JUMPING,
};

/// Параметры передвижения игрока
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Скорость бега (м/с)
    pub movement_speed: f32,
    /// Скорость поворота (1/с, slerp factor)
    pub rotation_speed: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            movement_speed: 5.0,
            rotation_speed: 15.0,
        }
    }
}

/// Состояние передвижения игрока
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Locomotion {
    /// Желаемая горизонтальная velocity (м/с)
    pub velocity: Vec3,
    /// Пишется ground detection (физика движка или headless physics)
    pub is_grounded: bool,
    /// Копия animator flag'а (LateUpdate sync)
    pub is_jumping: bool,
    /// Копия animator flag'а (LateUpdate sync)
    pub is_interacting: bool,
}

impl Default for Locomotion {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            is_grounded: true,
            is_jumping: false,
            is_interacting: false,
        }
    }
}

/// Один шаг steering: velocity из input + поворот к направлению движения
///
/// Без input velocity = 0 и поворот не меняется.
pub fn steer(
    basis: &CameraBasis,
    input: &PlayerInput,
    transform: &mut Transform,
    locomotion: &mut Locomotion,
    config: &LocomotionConfig,
    delta_secs: f32,
) {
    let direction = basis.steering(input.horizontal, input.vertical);
    locomotion.velocity = direction * config.movement_speed;

    if direction.length_squared() < 1e-6 {
        return;
    }

    let target = Transform::IDENTITY.looking_to(direction, Vec3::Y).rotation;
    let factor = (config.rotation_speed * delta_secs).clamp(0.0, 1.0);
    transform.rotation = transform.rotation.slerp(target, factor);
}

/// Система: camera-relative передвижение живых игроков
///
/// Камера ищется каждый tick. Нет MainCamera — используем basis самого игрока.
pub fn steer_players(
    time: Res<Time>,
    cameras: Query<&Transform, (With<MainCamera>, Without<Player>)>,
    mut players: Query<
        (&PlayerInput, &LocomotionConfig, &mut Transform, &mut Locomotion),
        (With<Player>, Without<Dead>),
    >,
) {
    let delta = time.delta_secs();
    let camera = cameras.iter().next().map(CameraBasis::from_transform);

    for (input, config, mut transform, mut locomotion) in players.iter_mut() {
        let basis = camera.unwrap_or_else(|| CameraBasis::from_transform(&transform));
        steer(&basis, input, &mut transform, &mut locomotion, config, delta);
    }
}

/// Система (Late): синхронизация animator flags ↔ locomotion
///
/// isInteracting/isJumping читаем из аниматора, isGrounded пишем в аниматор.
pub fn sync_animator_flags(mut players: Query<(&mut Animator, &mut Locomotion), With<Player>>) {
    for (mut animator, mut locomotion) in players.iter_mut() {
        let is_interacting = animator.get_bool(IS_INTERACTING);
        let is_jumping = animator.get_bool(IS_JUMPING);
        if locomotion.is_interacting != is_interacting || locomotion.is_jumping != is_jumping {
            locomotion.is_interacting = is_interacting;
            locomotion.is_jumping = is_jumping;
        }

        let grounded = locomotion.is_grounded;
        if animator.get_bool(IS_GROUNDED) != grounded {
            animator.set_bool(IS_GROUNDED, grounded);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    fn input(horizontal: f32, vertical: f32) -> PlayerInput {
        PlayerInput {
            horizontal,
            vertical,
            ..Default::default()
        }
    }

    #[test]
    fn test_steer_forward_velocity() {
        let basis = CameraBasis::from_transform(&Transform::IDENTITY);
        let mut transform = Transform::IDENTITY;
        let mut locomotion = Locomotion::default();

        steer(&basis, &input(0.0, 1.0), &mut transform, &mut locomotion, &LocomotionConfig::default(), DT);

        assert_relative_eq!(locomotion.velocity.z, -5.0, epsilon = 1e-5);
        assert_relative_eq!(locomotion.velocity.x, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_steer_no_input_stops_and_keeps_rotation() {
        let basis = CameraBasis::from_transform(&Transform::IDENTITY);
        let mut transform = Transform::IDENTITY.looking_to(Vec3::X, Vec3::Y);
        let before = transform.rotation;
        let mut locomotion = Locomotion {
            velocity: Vec3::new(3.0, 0.0, 0.0),
            ..Default::default()
        };

        steer(&basis, &input(0.0, 0.0), &mut transform, &mut locomotion, &LocomotionConfig::default(), DT);

        assert_eq!(locomotion.velocity, Vec3::ZERO);
        assert_eq!(transform.rotation, before);
    }

    #[test]
    fn test_steer_rotates_toward_movement() {
        let basis = CameraBasis::from_transform(&Transform::IDENTITY);
        let mut transform = Transform::IDENTITY;
        let mut locomotion = Locomotion::default();

        for _ in 0..120 {
            steer(&basis, &input(1.0, 0.0), &mut transform, &mut locomotion, &LocomotionConfig::default(), DT);
        }

        let forward = transform.forward().as_vec3();
        assert_relative_eq!(forward.x, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_locomotion_defaults() {
        let config = LocomotionConfig::default();
        assert_eq!(config.movement_speed, 5.0);
        assert_eq!(config.rotation_speed, 15.0);
        assert!(Locomotion::default().is_grounded);
    }
}
