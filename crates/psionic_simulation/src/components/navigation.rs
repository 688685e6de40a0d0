//! Navigation компоненты: NavigationAgent capability + NavAgent intent

use bevy::prelude::*;

/// Capability: path-following к destination с настраиваемой скоростью
///
/// Pathfinding живёт в движке — ECS только задаёт destination и speed.
pub trait NavigationAgent {
    fn set_destination(&mut self, point: Vec3);
    fn set_speed(&mut self, speed: f32);
    fn is_enabled(&self) -> bool;
}

/// Intent-компонент навигации (исполняется NavigationAgent движка)
///
/// Архитектура:
/// - ECS система пишет destination/speed (high-level intent)
/// - Движок читает и конвертирует в path following
/// - enabled = false → AI behaviors не исполняются (смерть, катсцены)
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct NavAgent {
    pub destination: Option<Vec3>,
    pub speed: f32,
    pub enabled: bool,
}

impl Default for NavAgent {
    fn default() -> Self {
        Self {
            destination: None,
            speed: 2.0, // 2 m/s — базовая скорость ходьбы
            enabled: true,
        }
    }
}

impl NavAgent {
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl NavigationAgent for NavAgent {
    fn set_destination(&mut self, point: Vec3) {
        // Проверяем что destination изменился — иначе Changed<NavAgent> спамит
        if self.destination != Some(point) {
            self.destination = Some(point);
        }
    }

    fn set_speed(&mut self, speed: f32) {
        if self.speed != speed {
            self.speed = speed;
        }
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
