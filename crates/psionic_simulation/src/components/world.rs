//! World presence компоненты: PerceptionLayer

use bevy::prelude::*;

use crate::perception::LayerMask;

/// Присутствие актора в spatial mirror (слой + радиус тела)
///
/// `sync_spatial_world` копирует позицию и этот компонент в SpatialWorld каждый tick.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PerceptionLayer {
    pub layer: LayerMask,
    pub body_radius: f32,
}

impl Default for PerceptionLayer {
    fn default() -> Self {
        Self {
            layer: LayerMask::NONE,
            body_radius: 0.28,
        }
    }
}

impl PerceptionLayer {
    pub fn player() -> Self {
        Self {
            layer: LayerMask::PLAYER,
            ..Default::default()
        }
    }

    pub fn enemy() -> Self {
        Self {
            layer: LayerMask::ENEMY,
            ..Default::default()
        }
    }
}
