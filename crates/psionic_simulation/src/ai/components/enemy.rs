//! Enemy AI components: state machine, perception snapshot, patrol point, cooldown
//!
//! Архитектура:
//! - EnemyBehavior — всё состояние контроллера врага (мутируется только AI системами)
//! - EnemyConfig — параметры поведения (serde: грузится из SimulationSettings)
//! - Muzzle — точка выстрела относительно врага

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::combat::Flingable;
use crate::components::{Actor, Animator, NavAgent, PerceptionLayer};
use crate::timer::AbilityTimer;

/// Состояние врага (пересчитывается каждый tick из PerceptionSnapshot)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum EnemyState {
    /// Бродит вокруг spawn point
    #[default]
    Patrol,
    /// Бежит к цели
    Chase,
    /// Стоит, поворачивается к цели, стреляет
    Attack,
}

impl EnemyState {
    /// Выбор состояния из perception
    ///
    /// in_attack_range побеждает независимо от in_sight_range
    /// (attack range больше sight range — ошибка конфига, но враг всё равно атакует).
    pub fn select(perception: PerceptionSnapshot) -> Self {
        if perception.in_attack_range {
            EnemyState::Attack
        } else if perception.in_sight_range {
            EnemyState::Chase
        } else {
            EnemyState::Patrol
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyState::Patrol => "Patrol",
            EnemyState::Chase => "Chase",
            EnemyState::Attack => "Attack",
        }
    }
}

/// Что враг "видит" в этом tick'е
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub struct PerceptionSnapshot {
    pub in_sight_range: bool,
    pub in_attack_range: bool,
}

/// Кандидат точки патрулирования
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct WalkPoint {
    pub position: Vec3,
    pub valid: bool,
}

impl WalkPoint {
    pub fn set(&mut self, position: Vec3) {
        self.position = position;
        self.valid = true;
    }

    pub fn invalidate(&mut self) {
        self.valid = false;
    }
}

/// Cooldown между попытками атаки
///
/// Армится каждой свежей попыткой (даже если выстрела не было),
/// очищается истечением таймера.
#[derive(Debug, Clone, Default)]
pub struct AttackCooldown {
    timer: AbilityTimer<()>,
    times_armed: u32,
}

impl AttackCooldown {
    pub fn is_active(&self) -> bool {
        self.timer.is_armed()
    }

    pub fn remaining(&self) -> Duration {
        self.timer.remaining()
    }

    /// Сколько раз cooldown был взведён (телеметрия/тесты)
    pub fn times_armed(&self) -> u32 {
        self.times_armed
    }

    pub fn arm(&mut self, duration: Duration) {
        self.timer.arm(duration, ());
        self.times_armed += 1;
    }

    /// Возвращает true в tick, когда cooldown закончился
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.timer.tick(delta).is_some()
    }
}

/// Состояние контроллера врага
///
/// Required: Actor (Health/Transform/Animator), NavAgent, EnemyConfig, Muzzle.
#[derive(Component, Debug, Clone, Default)]
#[require(Actor, NavAgent, EnemyConfig, Muzzle)]
pub struct EnemyBehavior {
    pub state: EnemyState,
    pub perception: PerceptionSnapshot,
    pub walk_point: WalkPoint,
    pub cooldown: AttackCooldown,
    /// Центр патрулирования (фиксируется в первом tick'е после спавна)
    pub spawn_point: Option<Vec3>,
}

/// Параметры поведения врага
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct EnemyConfig {
    /// Радиус "вижу игрока" (м)
    pub sight_range: f32,
    /// Радиус "могу стрелять" (м)
    pub attack_range: f32,
    /// Максимальный offset патрульной точки по x/z
    pub walk_point_range: f32,
    pub walk_speed: f32,
    pub chase_speed: f32,
    /// Cooldown между попытками атаки (сек)
    pub time_between_attacks: f32,
    /// Патрульная точка не дальше leash_radius от spawn point
    pub leash_radius: f32,
    /// Длина луча вниз при проверке земли под патрульной точкой
    pub ground_probe_length: f32,
    /// Ближе этого — точка достигнута
    pub arrival_radius: f32,
    /// Animator layer прицеливания
    pub aim_layer: usize,
    /// Минимальный вес aim layer для выстрела
    pub aim_threshold: f32,
    /// Скорость blend'а aim layer (1/с)
    pub aim_blend_rate: f32,
    /// Скорость поворота к цели в Attack (1/с)
    pub turn_rate: f32,
    pub projectile_speed: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            sight_range: 10.0,
            attack_range: 5.0,
            walk_point_range: 3.0,
            walk_speed: 1.5,
            chase_speed: 3.5,
            time_between_attacks: 1.0,
            leash_radius: 3.0,
            ground_probe_length: 2.0,
            arrival_radius: 1.0,
            aim_layer: 2,
            aim_threshold: 0.8,
            aim_blend_rate: 10.0,
            turn_rate: 15.0,
            projectile_speed: 30.0,
        }
    }
}

/// Точка выстрела в локальных координатах врага
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Muzzle {
    pub offset: Vec3,
}

impl Default for Muzzle {
    fn default() -> Self {
        // Правая рука, на уровне груди, чуть впереди
        Self {
            offset: Vec3::new(0.25, 1.4, -0.5),
        }
    }
}

impl Muzzle {
    /// Muzzle point в world space
    pub fn world_position(&self, transform: &Transform) -> Vec3 {
        transform.transform_point(self.offset)
    }
}

/// Стандартный набор компонентов врага
pub fn enemy_bundle(position: Vec3, config: EnemyConfig) -> impl Bundle {
    let nav = NavAgent {
        speed: config.walk_speed,
        ..Default::default()
    };

    (
        Actor,
        EnemyBehavior::default(),
        Transform::from_translation(position),
        PerceptionLayer::enemy(),
        Animator::with_layers(config.aim_layer + 1),
        nav,
        Flingable::default(),
        config,
    )
}
