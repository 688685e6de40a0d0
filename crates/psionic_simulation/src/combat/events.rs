//! Combat events (ECS ↔ движок)
//!
//! ECS → движок: ProjectileSpawned, EffectSpawned, SoundRequested, ActorFlung
//! Движок → ECS: DamageReceived

use bevy::prelude::*;

/// Event: враг выстрелил (движок спавнит projectile actor)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ProjectileSpawned {
    /// Кто стреляет
    pub shooter: Entity,

    /// Muzzle point в world coordinates
    pub origin: Vec3,

    /// Нормализованное направление на цель
    pub direction: Vec3,

    /// Ориентация projectile (look rotation вдоль direction)
    pub rotation: Quat,

    /// Скорость пули
    pub speed: f32,
}

/// Визуальные эффекты, которые ECS просит заспавнить
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    MuzzleFlash,
}

/// Event: заспавнить визуальный эффект в позе
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EffectSpawned {
    pub source: Entity,
    pub effect: EffectKind,
    pub position: Vec3,
    pub rotation: Quat,
}

/// Звуковые cue (audio playback — в движке)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    EnemyShot,
    PlayerDeath,
}

/// Event: проиграть звук от источника
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SoundRequested {
    pub source: Entity,
    pub cue: SoundCue,
}

/// Event: актор получил урон (движок → ECS, после collision detection)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DamageReceived {
    pub target: Entity,
    pub amount: f32,
    pub attacker: Option<Entity>,
}

/// Направление fling относительно источника
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlingDirection {
    /// К источнику (pull)
    Forwards,
    /// От источника (push)
    Backwards,
}

/// Event: актор отброшен ability (движок применяет impulse)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ActorFlung {
    pub target: Entity,
    pub source: Entity,
    pub direction: FlingDirection,
    pub impulse: Vec3,
}

/// Event: враг умер
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EnemyDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}
