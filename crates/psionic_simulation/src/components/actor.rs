//! Базовые компоненты акторов: Actor, Health, Dead, коллайдер

use bevy::prelude::*;

use crate::components::{Animator, PerceptionLayer};

/// Актор (игрок, враг) — базовый компонент для живых существ
///
/// Автоматически добавляет Health, Transform, Animator, PerceptionLayer через Required Components.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Health, Transform, Animator, PerceptionLayer)]
pub struct Actor;

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.current = (self.current - amount.max(0.0)).max(0.0);
    }

    pub fn refill(&mut self) {
        self.current = self.max;
    }
}

/// Компонент-маркер: актор мертв
///
/// Вешается death handler'ами. AI и input системы пропускают мёртвых.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Dead;

/// Размеры capsule коллайдера
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct CapsuleShape {
    pub radius: f32,
    pub height: f32,
}

/// Capsule коллайдер (исполняется физикой движка)
///
/// ECS меняет размеры (dash сжимает капсулу) и выключает коллайдер при смерти.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CapsuleCollider {
    pub radius: f32,
    pub height: f32,
    pub enabled: bool,
}

impl Default for CapsuleCollider {
    fn default() -> Self {
        Self {
            radius: 0.28,
            height: 1.6,
            enabled: true,
        }
    }
}

impl CapsuleCollider {
    pub fn shape(&self) -> CapsuleShape {
        CapsuleShape {
            radius: self.radius,
            height: self.height,
        }
    }

    pub fn set_shape(&mut self, shape: CapsuleShape) {
        self.radius = shape.radius;
        self.height = shape.height;
    }
}

/// Реакция на физику (rigid body движка)
///
/// kinematic = true — физика больше не двигает тело (смерть, root motion death animation).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PhysicsResponse {
    pub kinematic: bool,
}
