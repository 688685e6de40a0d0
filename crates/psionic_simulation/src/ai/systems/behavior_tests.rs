//! Tests for enemy behaviors (без App — прямые вызовы против capability traits).

#[cfg(test)]
mod tests {
    use super::super::behavior::*;
    use super::super::perception::{blend_aim_weight, sense_player};
    use crate::ai::{AttackCooldown, EnemyBehavior, EnemyConfig, Muzzle};
    use crate::components::{AnimationDriver, Animator, NavAgent, MOVING_AMOUNT};
    use crate::perception::{GroundPatch, LayerMask, SpatialBody, SpatialWorld};
    use bevy::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn arena() -> SpatialWorld {
        SpatialWorld::with_ground([GroundPatch::square(Vec3::ZERO, 50.0)])
    }

    fn world_with_player(position: Vec3) -> SpatialWorld {
        let mut world = arena();
        world.insert_body(SpatialBody {
            entity: Entity::from_raw(1),
            position,
            radius: 0.0,
            layer: LayerMask::PLAYER,
        });
        world
    }

    fn aimed_animator(weight: f32) -> Animator {
        let mut animator = Animator::with_layers(3);
        animator.set_layer_weight(2, weight);
        animator
    }

    #[test]
    fn test_sense_player_chase_distance() {
        let world = world_with_player(Vec3::new(7.0, 0.0, 0.0));
        let snapshot = sense_player(&world, Vec3::ZERO, &EnemyConfig::default());

        assert!(snapshot.in_sight_range);
        assert!(!snapshot.in_attack_range);
    }

    #[test]
    fn test_sense_player_ignores_enemy_layer() {
        let mut world = arena();
        world.insert_body(SpatialBody {
            entity: Entity::from_raw(2),
            position: Vec3::new(1.0, 0.0, 0.0),
            radius: 0.28,
            layer: LayerMask::ENEMY,
        });

        let snapshot = sense_player(&world, Vec3::ZERO, &EnemyConfig::default());
        assert!(!snapshot.in_sight_range);
        assert!(!snapshot.in_attack_range);
    }

    #[test]
    fn test_aim_blend_moves_toward_target() {
        let weight = blend_aim_weight(0.0, true, 10.0, 0.05);
        assert!((weight - 0.5).abs() < 1e-6);

        let weight = blend_aim_weight(weight, false, 10.0, 0.05);
        assert!((weight - 0.25).abs() < 1e-6);

        // Большой dt → фактор clamp в 1
        assert_eq!(blend_aim_weight(0.3, true, 10.0, 1.0), 1.0);
    }

    #[test]
    fn test_sample_walk_point_respects_constraints() {
        let world = arena();
        let config = EnemyConfig {
            walk_point_range: 6.0,
            ..Default::default()
        };
        let spawn = Vec3::ZERO;

        for seed in 0..20u64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for _ in 0..50 {
                if let Some(point) = sample_walk_point(&world, &mut rng, spawn, spawn, &config) {
                    assert!(point.distance(spawn) <= config.leash_radius);
                    assert_eq!(point.y, 0.0);
                }
            }
        }
    }

    #[test]
    fn test_sample_walk_point_requires_ground() {
        // Земли нет вообще → ни одна точка не принимается
        let world = SpatialWorld::default();
        let config = EnemyConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..100 {
            assert!(sample_walk_point(&world, &mut rng, Vec3::ZERO, Vec3::ZERO, &config).is_none());
        }
    }

    #[test]
    fn test_sample_walk_point_non_finite_range() {
        let world = arena();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        for range in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let config = EnemyConfig {
                walk_point_range: range,
                ..Default::default()
            };
            assert!(sample_walk_point(&world, &mut rng, Vec3::ZERO, Vec3::ZERO, &config).is_none());
        }
    }

    #[test]
    fn test_sample_walk_point_too_high_above_ground() {
        // Враг на 5м над землёй, probe 2м → земля не найдена
        let world = arena();
        let config = EnemyConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let position = Vec3::new(0.0, 5.0, 0.0);

        for _ in 0..100 {
            assert!(sample_walk_point(&world, &mut rng, position, position, &config).is_none());
        }
    }

    #[test]
    fn test_patrol_without_point_keeps_destination() {
        // Без земли точка не находится → destination не трогаем
        let world = SpatialWorld::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut nav = NavAgent::default();
        let mut animator = Animator::default();
        let mut behavior = EnemyBehavior {
            spawn_point: Some(Vec3::ZERO),
            ..Default::default()
        };
        let config = EnemyConfig::default();

        patrol(&world, &mut rng, &mut nav, &mut animator, Vec3::ZERO, &mut behavior, &config);

        assert_eq!(nav.destination, None);
        assert_eq!(nav.speed, config.walk_speed);
        assert_eq!(animator.get_float(MOVING_AMOUNT), Some(0.5));
        assert!(!behavior.walk_point.valid);
    }

    #[test]
    fn test_patrol_issues_destination_and_invalidates_on_arrival() {
        let world = arena();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut nav = NavAgent::default();
        let mut animator = Animator::default();
        let mut behavior = EnemyBehavior {
            spawn_point: Some(Vec3::ZERO),
            ..Default::default()
        };
        behavior.walk_point.set(Vec3::new(2.0, 0.0, 0.0));
        let config = EnemyConfig::default();

        patrol(&world, &mut rng, &mut nav, &mut animator, Vec3::ZERO, &mut behavior, &config);
        assert_eq!(nav.destination, Some(Vec3::new(2.0, 0.0, 0.0)));
        assert!(behavior.walk_point.valid);

        // Прибыли (ближе arrival_radius)
        let near = Vec3::new(1.5, 0.0, 0.0);
        patrol(&world, &mut rng, &mut nav, &mut animator, near, &mut behavior, &config);
        assert!(!behavior.walk_point.valid);
    }

    #[test]
    fn test_chase_targets_live_position() {
        let mut nav = NavAgent::default();
        let mut animator = Animator::default();
        let config = EnemyConfig::default();

        chase(&mut nav, &mut animator, Vec3::new(7.0, 0.0, 0.0), &config);
        assert_eq!(nav.destination, Some(Vec3::new(7.0, 0.0, 0.0)));
        assert_eq!(nav.speed, config.chase_speed);
        assert_eq!(animator.get_float(MOVING_AMOUNT), Some(1.0));

        chase(&mut nav, &mut animator, Vec3::new(6.0, 0.0, 1.0), &config);
        assert_eq!(nav.destination, Some(Vec3::new(6.0, 0.0, 1.0)));
    }

    #[test]
    fn test_attack_not_ready_still_arms_cooldown() {
        let mut nav = NavAgent::default();
        let mut animator = aimed_animator(0.5);
        let mut transform = Transform::from_xyz(0.0, 0.0, 0.0);
        let mut cooldown = AttackCooldown::default();
        let config = EnemyConfig::default();
        let target = Vec3::new(3.0, 0.0, 0.0);

        let attempt = attack(
            &mut nav,
            &mut animator,
            &mut transform,
            &mut cooldown,
            &Muzzle::default(),
            target,
            &config,
            1.0 / 60.0,
        );

        assert_eq!(attempt, AttackAttempt::NotReady);
        assert!(cooldown.is_active());
        assert_eq!(nav.destination, Some(Vec3::ZERO));
        assert_eq!(animator.get_float(MOVING_AMOUNT), Some(0.0));
    }

    #[test]
    fn test_attack_fires_when_aim_ready() {
        let mut nav = NavAgent::default();
        let mut animator = aimed_animator(0.9);
        let mut transform = Transform::IDENTITY;
        let mut cooldown = AttackCooldown::default();
        let config = EnemyConfig::default();
        let target = Vec3::new(0.0, 1.4, -4.0);

        let attempt = attack(
            &mut nav,
            &mut animator,
            &mut transform,
            &mut cooldown,
            &Muzzle::default(),
            target,
            &config,
            1.0 / 60.0,
        );

        let AttackAttempt::Fired(shot) = attempt else {
            panic!("expected shot, got {:?}", attempt);
        };
        assert!((shot.direction.length() - 1.0).abs() < 1e-5);
        assert!(shot.direction.z < 0.0);
        assert!((shot.origin + shot.direction * (target - shot.origin).length() - target).length() < 1e-3);
        assert_eq!(cooldown.times_armed(), 1);

        // Cooldown активен → следующая попытка не происходит
        let again = attack(
            &mut nav,
            &mut animator,
            &mut transform,
            &mut cooldown,
            &Muzzle::default(),
            target,
            &config,
            1.0 / 60.0,
        );
        assert_eq!(again, AttackAttempt::OnCooldown);
        assert_eq!(cooldown.times_armed(), 1);
    }

    #[test]
    fn test_attack_turns_toward_target() {
        let mut nav = NavAgent::default();
        let mut animator = aimed_animator(0.0);
        let mut transform = Transform::IDENTITY; // forward = -Z
        let mut cooldown = AttackCooldown::default();
        let config = EnemyConfig::default();
        let target = Vec3::new(5.0, 0.0, 0.0);

        for _ in 0..60 {
            attack(
                &mut nav,
                &mut animator,
                &mut transform,
                &mut cooldown,
                &Muzzle::default(),
                target,
                &config,
                1.0 / 60.0,
            );
        }

        let forward = transform.forward().as_vec3();
        assert!((forward - Vec3::X).length() < 1e-2);
    }

    #[test]
    fn test_facing_rotation_keeps_forward_for_vertical_target() {
        let transform = Transform::IDENTITY.looking_to(Vec3::X, Vec3::Y);
        let rotation = facing_rotation(&transform, Vec3::new(0.0, 10.0, 0.0));

        let forward = rotation * Vec3::NEG_Z;
        assert!((forward - Vec3::X).length() < 1e-5);
    }
}
