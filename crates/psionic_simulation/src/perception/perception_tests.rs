//! Tests for SpatialWorld perception queries.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use super::super::*;

    fn body(index: u32, position: Vec3, layer: LayerMask) -> SpatialBody {
        SpatialBody {
            entity: Entity::from_raw(index),
            position,
            radius: 0.3,
            layer,
        }
    }

    #[test]
    fn test_layer_mask_intersects() {
        let mask = LayerMask::PLAYER | LayerMask::GROUND;
        assert!(mask.intersects(LayerMask::PLAYER));
        assert!(mask.intersects(LayerMask::GROUND));
        assert!(!mask.intersects(LayerMask::ENEMY));
        assert!(!LayerMask::NONE.intersects(LayerMask::ALL));
    }

    #[test]
    fn test_sphere_overlap_filters_by_layer_and_radius() {
        let mut world = SpatialWorld::default();
        world.insert_body(body(1, Vec3::new(4.0, 0.0, 0.0), LayerMask::PLAYER));
        world.insert_body(body(2, Vec3::new(2.0, 0.0, 0.0), LayerMask::ENEMY));
        world.insert_body(body(3, Vec3::new(20.0, 0.0, 0.0), LayerMask::PLAYER));

        let hits = world.sphere_overlap(Vec3::ZERO, 5.0, LayerMask::PLAYER);
        assert_eq!(hits, vec![Entity::from_raw(1)]);

        assert!(world.check_sphere(Vec3::ZERO, 5.0, LayerMask::ENEMY));
        assert!(!world.check_sphere(Vec3::ZERO, 1.0, LayerMask::ALL));
    }

    #[test]
    fn test_sphere_overlap_counts_body_radius() {
        let mut world = SpatialWorld::default();
        // 5.2 от центра, радиус тела 0.3 → касается сферы 5.0
        world.insert_body(body(1, Vec3::new(5.2, 0.0, 0.0), LayerMask::PLAYER));

        assert!(world.check_sphere(Vec3::ZERO, 5.0, LayerMask::PLAYER));
        assert!(!world.check_sphere(Vec3::ZERO, 4.8, LayerMask::PLAYER));
    }

    #[test]
    fn test_downward_probe_hits_ground_inside_patch() {
        let world = SpatialWorld::with_ground([GroundPatch::square(Vec3::ZERO, 10.0)]);

        let hit = world
            .raycast(Vec3::new(3.0, 1.0, -2.0), Vec3::NEG_Y, 2.0, LayerMask::GROUND)
            .expect("probe над землёй должен попасть");
        assert_eq!(hit.entity, None);
        assert!((hit.distance - 1.0).abs() < 1e-5);
        assert!((hit.point - Vec3::new(3.0, 0.0, -2.0)).length() < 1e-5);
    }

    #[test]
    fn test_downward_probe_misses_outside_patch_or_too_far() {
        let world = SpatialWorld::with_ground([GroundPatch::square(Vec3::ZERO, 10.0)]);

        // За краем платформы
        assert!(world
            .raycast(Vec3::new(12.0, 0.5, 0.0), Vec3::NEG_Y, 2.0, LayerMask::GROUND)
            .is_none());
        // Слишком высоко для probe длиной 2
        assert!(world
            .raycast(Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Y, 2.0, LayerMask::GROUND)
            .is_none());
        // Не тот слой
        assert!(world
            .raycast(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y, 2.0, LayerMask::PLAYER)
            .is_none());
    }

    #[test]
    fn test_probe_starting_on_surface_hits() {
        let world = SpatialWorld::with_ground([GroundPatch::square(Vec3::ZERO, 5.0)]);
        let hit = world.raycast(Vec3::new(1.0, 0.0, 1.0), Vec3::NEG_Y, 2.0, LayerMask::GROUND);
        assert!(hit.is_some_and(|h| h.distance == 0.0));
    }

    #[test]
    fn test_raycast_returns_nearest_body() {
        let mut world = SpatialWorld::default();
        world.insert_body(body(1, Vec3::new(0.0, 0.0, -8.0), LayerMask::ENEMY));
        world.insert_body(body(2, Vec3::new(0.0, 0.0, -4.0), LayerMask::ENEMY));
        world.insert_body(body(3, Vec3::new(0.0, 0.0, 4.0), LayerMask::ENEMY));

        let hit = world
            .raycast(Vec3::ZERO, Vec3::NEG_Z, 50.0, LayerMask::ENEMY)
            .expect("луч вдоль -Z должен попасть");
        assert_eq!(hit.entity, Some(Entity::from_raw(2)));
        assert!((hit.distance - 3.7).abs() < 1e-4);
    }

    #[test]
    fn test_raycast_zero_direction_misses() {
        let world = SpatialWorld::with_ground([GroundPatch::square(Vec3::ZERO, 5.0)]);
        assert!(world.raycast(Vec3::Y, Vec3::ZERO, 10.0, LayerMask::ALL).is_none());
    }
}
