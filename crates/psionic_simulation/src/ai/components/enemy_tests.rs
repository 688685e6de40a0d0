//! Tests for enemy AI components.

#[cfg(test)]
mod tests {
    use super::super::enemy::*;
    use bevy::prelude::*;
    use std::time::Duration;

    fn snapshot(in_sight_range: bool, in_attack_range: bool) -> PerceptionSnapshot {
        PerceptionSnapshot {
            in_sight_range,
            in_attack_range,
        }
    }

    #[test]
    fn test_state_selection_table() {
        assert_eq!(EnemyState::select(snapshot(false, false)), EnemyState::Patrol);
        assert_eq!(EnemyState::select(snapshot(true, false)), EnemyState::Chase);
        assert_eq!(EnemyState::select(snapshot(true, true)), EnemyState::Attack);
    }

    #[test]
    fn test_attack_without_sight_is_attack() {
        // attack_range > sight_range в конфиге → всё равно атакуем
        assert_eq!(EnemyState::select(snapshot(false, true)), EnemyState::Attack);
    }

    #[test]
    fn test_enemy_config_default() {
        let config = EnemyConfig::default();
        assert_eq!(config.sight_range, 10.0);
        assert_eq!(config.attack_range, 5.0);
        assert_eq!(config.leash_radius, 3.0);
        assert_eq!(config.ground_probe_length, 2.0);
        assert_eq!(config.aim_layer, 2);
        assert_eq!(config.aim_threshold, 0.8);
        assert_eq!(config.turn_rate, 15.0);
    }

    #[test]
    fn test_walk_point_lifecycle() {
        let mut walk_point = WalkPoint::default();
        assert!(!walk_point.valid);

        walk_point.set(Vec3::new(1.0, 0.0, 2.0));
        assert!(walk_point.valid);
        assert_eq!(walk_point.position, Vec3::new(1.0, 0.0, 2.0));

        walk_point.invalidate();
        assert!(!walk_point.valid);
    }

    #[test]
    fn test_attack_cooldown_clears_after_duration() {
        let mut cooldown = AttackCooldown::default();
        assert!(!cooldown.is_active());

        cooldown.arm(Duration::from_secs(1));
        assert!(cooldown.is_active());
        assert_eq!(cooldown.times_armed(), 1);

        assert!(!cooldown.tick(Duration::from_millis(500)));
        assert!(cooldown.is_active());
        assert_eq!(cooldown.remaining(), Duration::from_millis(500));

        assert!(cooldown.tick(Duration::from_millis(500)));
        assert!(!cooldown.is_active());
    }

    #[test]
    fn test_muzzle_world_position_follows_rotation() {
        let muzzle = Muzzle {
            offset: Vec3::new(0.0, 1.0, -1.0),
        };
        let transform = Transform::from_xyz(2.0, 0.0, 0.0)
            .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));

        // Поворот на 90° вокруг Y: локальный -Z → world -X
        let point = muzzle.world_position(&transform);
        assert!((point - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-5);
    }
}
