//! Perception — spatial queries (sphere overlap, raycast)
//!
//! Архитектура:
//! - `PerceptionService` — capability интерфейс, AI/abilities пишутся против него
//! - `SpatialWorld` — ECS-зеркало мира: позиции акторов (обновляются каждый tick)
//!   + статичные ground patches. Движок может зеркалить сюда свою физику.
//!
//! Слои — битовые маски, как physics layers движка.

use bevy::prelude::*;
use std::ops::BitOr;

use crate::components::{CapsuleCollider, PerceptionLayer};

// ============================================================================
// Layer Битовые Маски
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: Self = Self(0);
    /// Layer 2: игрок
    pub const PLAYER: Self = Self(0b10);
    /// Layer 3: враги
    pub const ENEMY: Self = Self(0b100);
    /// Layer 4: земля (патрульные точки валидны только над ней)
    pub const GROUND: Self = Self(0b1000);
    pub const ALL: Self = Self(u32::MAX);

    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for LayerMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Результат raycast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Entity актора (None для статичной геометрии)
    pub entity: Option<Entity>,
    pub point: Vec3,
    pub distance: f32,
}

/// Capability: spatial queries против геометрии мира и слоёв акторов
pub trait PerceptionService {
    /// Все акторы из `filter`, чьи тела пересекают сферу
    fn sphere_overlap(&self, center: Vec3, radius: f32, filter: LayerMask) -> Vec<Entity>;

    /// Ближайшее попадание луча (direction нормализуется внутри)
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: LayerMask,
    ) -> Option<RayHit>;

    fn check_sphere(&self, center: Vec3, radius: f32, filter: LayerMask) -> bool {
        !self.sphere_overlap(center, radius, filter).is_empty()
    }
}

/// Тело актора в spatial mirror (сфера)
#[derive(Debug, Clone, Copy)]
pub struct SpatialBody {
    pub entity: Entity,
    pub position: Vec3,
    pub radius: f32,
    pub layer: LayerMask,
}

/// Горизонтальный прямоугольник земли (XZ bounds на высоте `height`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPatch {
    pub min: Vec2,
    pub max: Vec2,
    pub height: f32,
}

impl GroundPatch {
    /// Квадрат со стороной `2 * half_extent` вокруг `center`
    pub fn square(center: Vec3, half_extent: f32) -> Self {
        Self {
            min: Vec2::new(center.x - half_extent, center.z - half_extent),
            max: Vec2::new(center.x + half_extent, center.z + half_extent),
            height: center.y,
        }
    }

    fn contains_xz(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.z >= self.min.y && point.z <= self.max.y
    }
}

/// ECS-зеркало мира для perception queries
#[derive(Resource, Debug, Default, Clone)]
pub struct SpatialWorld {
    bodies: Vec<SpatialBody>,
    ground: Vec<GroundPatch>,
}

impl SpatialWorld {
    pub fn with_ground(ground: impl IntoIterator<Item = GroundPatch>) -> Self {
        Self {
            bodies: Vec::new(),
            ground: ground.into_iter().collect(),
        }
    }

    pub fn add_ground(&mut self, patch: GroundPatch) {
        self.ground.push(patch);
    }

    pub fn ground(&self) -> &[GroundPatch] {
        &self.ground
    }

    pub fn bodies(&self) -> &[SpatialBody] {
        &self.bodies
    }

    pub fn clear_bodies(&mut self) {
        self.bodies.clear();
    }

    pub fn insert_body(&mut self, body: SpatialBody) {
        self.bodies.push(body);
    }

    fn raycast_ground(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        // Луч параллелен земле — не попадает
        if direction.y.abs() < f32::EPSILON {
            return None;
        }

        self.ground
            .iter()
            .filter_map(|patch| {
                let distance = (patch.height - origin.y) / direction.y;
                if !(0.0..=max_distance).contains(&distance) {
                    return None;
                }
                let point = origin + direction * distance;
                patch.contains_xz(point).then_some(RayHit {
                    entity: None,
                    point,
                    distance,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn raycast_bodies(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: LayerMask,
    ) -> Option<RayHit> {
        self.bodies
            .iter()
            .filter(|body| body.layer.intersects(filter))
            .filter_map(|body| {
                let distance = ray_sphere_distance(origin, direction, body.position, body.radius)?;
                (distance <= max_distance).then_some(RayHit {
                    entity: Some(body.entity),
                    point: origin + direction * distance,
                    distance,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

impl PerceptionService for SpatialWorld {
    fn sphere_overlap(&self, center: Vec3, radius: f32, filter: LayerMask) -> Vec<Entity> {
        self.bodies
            .iter()
            .filter(|body| body.layer.intersects(filter))
            .filter(|body| body.position.distance(center) <= radius + body.radius)
            .map(|body| body.entity)
            .collect()
    }

    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: LayerMask,
    ) -> Option<RayHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO || max_distance < 0.0 {
            return None;
        }

        let ground_hit = if filter.intersects(LayerMask::GROUND) {
            self.raycast_ground(origin, direction, max_distance)
        } else {
            None
        };
        let body_hit = self.raycast_bodies(origin, direction, max_distance, filter);

        match (ground_hit, body_hit) {
            (Some(ground), Some(body)) => Some(if body.distance < ground.distance { body } else { ground }),
            (ground, body) => ground.or(body),
        }
    }
}

/// Расстояние вдоль нормализованного луча до первой точки сферы.
/// Origin внутри сферы → 0.
fn ray_sphere_distance(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let offset = origin - center;
    let c = offset.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }

    let b = offset.dot(direction);
    if b > 0.0 {
        // Сфера позади луча
        return None;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    Some(-b - discriminant.sqrt())
}

/// Система: зеркалим позиции акторов в SpatialWorld (первая в tick)
///
/// Акторы с выключенным коллайдером (мёртвый игрок) не видны perception.
pub fn sync_spatial_world(
    mut world: ResMut<SpatialWorld>,
    bodies: Query<(Entity, &Transform, &PerceptionLayer, Option<&CapsuleCollider>)>,
) {
    world.clear_bodies();

    for (entity, transform, layer, collider) in bodies.iter() {
        if collider.is_some_and(|c| !c.enabled) {
            continue;
        }

        world.insert_body(SpatialBody {
            entity,
            position: transform.translation,
            radius: layer.body_radius,
            layer: layer.layer,
        });
    }
}

#[cfg(test)]
mod perception_tests;
