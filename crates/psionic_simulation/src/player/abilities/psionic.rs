//! Psionic class: dash (special move) + push/pull fling (special ability)

use bevy::prelude::*;
use std::time::Duration;

use super::{AbilityBehavior, AbilityContext, AbilityKind, AbilityPhase, AbilitySequence, AbilityStep};
use crate::components::{AnimationDriver, CapsuleShape};

/// Длительность dash анимации
pub const DASH_DURATION: Duration = Duration::from_millis(700);
/// Капсула во время dash (проскальзываем сквозь узкие места)
pub const DASH_CAPSULE: CapsuleShape = CapsuleShape {
    radius: 0.1,
    height: 0.1,
};
pub const DASH_ANIMATION: &str = "Dash Forwards";

pub const PULL_DELAY: Duration = Duration::from_millis(100);
pub const PULL_ANIMATION: &str = "PsionicPull";

pub const PUSH_DELAY: Duration = Duration::from_millis(270);
pub const PUSH_ANIMATION: &str = "PsionicPush";
/// Радиус push вокруг игрока
pub const PUSH_RADIUS: f32 = 3.0;

pub const CAST_BLEND_TIME: f32 = 0.2;

/// Направление dash
///
/// Без move input — текущий forward игрока, иначе camera-relative steering
/// (как у locomotion: normalize, затем y = 0).
pub fn dash_direction(ctx: &AbilityContext) -> Vec3 {
    if ctx.input.has_move_input() {
        ctx.camera.steering(ctx.input.horizontal, ctx.input.vertical)
    } else {
        ctx.transform.forward().as_vec3()
    }
}

/// Psionic способности
#[derive(Debug, Clone, Copy, Default)]
pub struct Psionic;

impl AbilityBehavior for Psionic {
    fn special_move(&self, ctx: &mut AbilityContext) -> Option<AbilitySequence> {
        let direction = dash_direction(ctx);
        let restore = ctx.collider.shape();

        ctx.animator.apply_root_motion(true);
        ctx.collider.set_shape(DASH_CAPSULE);
        ctx.animator.play(DASH_ANIMATION, true);

        Some(AbilitySequence::new(
            AbilityKind::Dash,
            AbilityPhase::Dashing,
            direction,
            DASH_DURATION,
            AbilityStep::FinishDash { restore },
        ))
    }

    fn special_ability(&self, ctx: &mut AbilityContext) -> Option<AbilitySequence> {
        let facing = ctx.transform.forward().as_vec3();

        let sequence = if ctx.lock_on.is_some() {
            ctx.animator.cross_fade(PULL_ANIMATION, CAST_BLEND_TIME);
            AbilitySequence::new(
                AbilityKind::Pull,
                AbilityPhase::Windup,
                facing,
                PULL_DELAY,
                AbilityStep::ReleasePull,
            )
        } else {
            ctx.animator.cross_fade(PUSH_ANIMATION, CAST_BLEND_TIME);
            AbilitySequence::new(
                AbilityKind::Push,
                AbilityPhase::Windup,
                facing,
                PUSH_DELAY,
                AbilityStep::ReleasePush {
                    radius: PUSH_RADIUS,
                },
            )
        };

        Some(sequence)
    }
}
