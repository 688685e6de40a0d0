//! Camera marker + camera-relative basis
//!
//! Камерой управляет движок; ECS нужен только её Transform
//! для camera-relative steering и dash direction.

use bevy::prelude::*;

/// Marker: основная камера (ищется query'ем каждый tick)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct MainCamera;

/// Forward/right оси для camera-relative движения
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub forward: Vec3,
    pub right: Vec3,
}

impl CameraBasis {
    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            forward: transform.forward().as_vec3(),
            right: transform.right().as_vec3(),
        }
    }

    /// Направление движения из осей input
    ///
    /// forward·vertical + right·horizontal, normalize, затем y = 0.
    /// Без renormalize после обнуления y: при наклонённой камере вектор короче 1.
    pub fn steering(&self, horizontal: f32, vertical: f32) -> Vec3 {
        let mut direction = (self.forward * vertical + self.right * horizontal).normalize_or_zero();
        direction.y = 0.0;
        direction
    }
}
