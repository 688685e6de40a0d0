//! Tests for ability controller + psionic class.

#[cfg(test)]
mod tests {
    use super::super::psionic::*;
    use super::super::*;
    use crate::components::{AnimationRequest, Animator, CameraBasis, CapsuleCollider, PlayerInput};
    use bevy::prelude::*;
    use std::time::Duration;

    const TICK: Duration = Duration::from_millis(10);

    struct Fixture {
        transform: Transform,
        input: PlayerInput,
        animator: Animator,
        collider: CapsuleCollider,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                transform: Transform::IDENTITY.looking_to(Vec3::X, Vec3::Y),
                input: PlayerInput::default(),
                animator: Animator::default(),
                collider: CapsuleCollider::default(),
            }
        }

        fn ctx(&mut self, lock_on: Option<Entity>) -> AbilityContext<'_> {
            AbilityContext {
                transform: &self.transform,
                input: &self.input,
                camera: CameraBasis::from_transform(&Transform::IDENTITY),
                lock_on,
                animator: &mut self.animator,
                collider: &mut self.collider,
            }
        }
    }

    #[test]
    fn test_dash_without_input_uses_forward() {
        let mut fixture = Fixture::new();
        let sequence = Psionic.special_move(&mut fixture.ctx(None)).expect("dash");

        assert_eq!(sequence.kind, AbilityKind::Dash);
        assert_eq!(sequence.phase, AbilityPhase::Dashing);
        assert!((sequence.direction - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_dash_with_input_is_camera_relative() {
        let mut fixture = Fixture::new();
        fixture.input.vertical = 1.0;

        let sequence = Psionic.special_move(&mut fixture.ctx(None)).expect("dash");
        // Identity камера: forward = -Z
        assert!((sequence.direction - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_dash_shrinks_capsule_and_enables_root_motion() {
        let mut fixture = Fixture::new();
        let sequence = Psionic.special_move(&mut fixture.ctx(None)).expect("dash");

        assert_eq!(fixture.collider.shape(), DASH_CAPSULE);
        assert!(fixture.animator.root_motion());
        assert_eq!(
            fixture.animator.requests(),
            &[AnimationRequest::Play {
                name: DASH_ANIMATION.to_string(),
                root_motion: true
            }]
        );
        assert_eq!(
            sequence.pending_step(),
            Some(&AbilityStep::FinishDash {
                restore: CapsuleCollider::default().shape()
            })
        );
    }

    #[test]
    fn test_special_ability_pull_with_lock_on() {
        let mut fixture = Fixture::new();
        let sequence = Psionic
            .special_ability(&mut fixture.ctx(Some(Entity::from_raw(5))))
            .expect("pull");

        assert_eq!(sequence.kind, AbilityKind::Pull);
        assert_eq!(sequence.remaining(), PULL_DELAY);
        assert_eq!(fixture.animator.last_requested(), Some(PULL_ANIMATION));
    }

    #[test]
    fn test_special_ability_push_without_lock_on() {
        let mut fixture = Fixture::new();
        let sequence = Psionic.special_ability(&mut fixture.ctx(None)).expect("push");

        assert_eq!(sequence.kind, AbilityKind::Push);
        assert_eq!(sequence.remaining(), PUSH_DELAY);
        assert_eq!(
            fixture.animator.requests(),
            &[AnimationRequest::CrossFade {
                name: PUSH_ANIMATION.to_string(),
                blend_time: CAST_BLEND_TIME
            }]
        );
    }

    #[test]
    fn test_unclassed_has_no_abilities() {
        let mut fixture = Fixture::new();
        assert!(PlayerClass::Unclassed.special_move(&mut fixture.ctx(None)).is_none());
        assert!(PlayerClass::Unclassed.special_ability(&mut fixture.ctx(None)).is_none());
        assert!(fixture.animator.requests().is_empty());
    }

    #[test]
    fn test_controller_single_slot() {
        let mut fixture = Fixture::new();
        let mut controller = AbilityController::new(PlayerClass::Psionic);

        let dash = Psionic.special_move(&mut fixture.ctx(None)).expect("dash");
        let push = Psionic.special_ability(&mut fixture.ctx(None)).expect("push");

        assert!(controller.start(dash));
        assert!(!controller.start(push));
        assert_eq!(controller.sequence().map(|s| s.kind), Some(AbilityKind::Dash));
    }

    #[test]
    fn test_controller_tick_releases_slot_after_delay() {
        let mut fixture = Fixture::new();
        let mut controller = AbilityController::new(PlayerClass::Psionic);
        controller.start(Psionic.special_ability(&mut fixture.ctx(None)).expect("push"));

        // 270ms = 27 ticks по 10ms
        for _ in 0..26 {
            assert_eq!(controller.tick(TICK), None);
        }
        assert_eq!(
            controller.sequence().map(|s| s.elapsed()),
            Some(Duration::from_millis(260))
        );

        let fired = controller.tick(TICK);
        assert_eq!(
            fired,
            Some((AbilityKind::Push, AbilityStep::ReleasePush { radius: PUSH_RADIUS }))
        );
        assert!(!controller.is_busy());
    }

    #[test]
    fn test_controller_cancel_drops_pending_step() {
        let mut fixture = Fixture::new();
        let mut controller = AbilityController::new(PlayerClass::Psionic);
        controller.start(Psionic.special_move(&mut fixture.ctx(None)).expect("dash"));

        assert_eq!(controller.cancel(), Some(AbilityKind::Dash));
        assert_eq!(controller.tick(Duration::from_secs(1)), None);
        assert!(!controller.is_busy());
    }

    #[test]
    fn test_is_ahead() {
        assert!(is_ahead(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.5, 0.0, -2.0)));
        assert!(is_ahead(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(2.0, 0.0, 0.0)));
        assert!(!is_ahead(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, 1.0)));
    }
}
