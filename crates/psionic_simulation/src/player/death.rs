//! Player damage intake + death sequence
//!
//! Смерть: коллайдер выключен, тело kinematic, root motion Death анимация,
//! активная ability отменена. Через 5с — "You Died" + PlayerDied,
//! ещё через 2с — despawn + SceneRestartRequested.

use bevy::prelude::*;
use std::time::Duration;

use crate::combat::{resisted_damage, DamageReceived, SoundCue, SoundRequested};
use crate::components::{
    AnimationDriver, Animator, CapsuleCollider, Dead, Health, PhysicsResponse, Player,
};
use crate::player::{AbilityController, Locomotion, PlayerDied, PlayerStats, SceneRestartRequested};
use crate::timer::AbilityTimer;

pub const DEATH_ANIMATION: &str = "Death";
/// Death анимация → "You Died"
pub const DEATH_ANNOUNCE_DELAY: Duration = Duration::from_secs(5);
/// "You Died" → restart сцены
pub const DEATH_RESTART_DELAY: Duration = Duration::from_secs(2);

/// Шаги death sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathStep {
    Announce,
    Restart,
}

/// Death sequence игрока (вешается в момент смерти вместе с Dead)
#[derive(Component, Debug, Clone)]
pub struct DeathSequence {
    timer: AbilityTimer<DeathStep>,
}

impl Default for DeathSequence {
    fn default() -> Self {
        let mut timer = AbilityTimer::new();
        timer.arm(DEATH_ANNOUNCE_DELAY, DeathStep::Announce);
        Self { timer }
    }
}

impl DeathSequence {
    pub fn pending_step(&self) -> Option<DeathStep> {
        self.timer.payload().copied()
    }

    pub fn remaining(&self) -> Duration {
        self.timer.remaining()
    }

    /// Продвигает sequence. Announce автоматически армит Restart.
    pub fn tick(&mut self, delta: Duration) -> Option<DeathStep> {
        let step = self.timer.tick(delta)?;
        if step == DeathStep::Announce {
            self.timer.arm(DEATH_RESTART_DELAY, DeathStep::Restart);
        }
        Some(step)
    }
}

/// Система: урон игроку (health -= amount / resistance) + death transition
#[allow(clippy::type_complexity)]
pub fn apply_player_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageReceived>,
    mut sounds: EventWriter<SoundRequested>,
    mut players: Query<
        (
            &mut Health,
            &mut Animator,
            Option<&PlayerStats>,
            Option<&mut CapsuleCollider>,
            Option<&mut PhysicsResponse>,
            Option<&mut AbilityController>,
            Option<&mut Locomotion>,
            Has<Dead>,
        ),
        With<Player>,
    >,
) {
    for event in damage_events.read() {
        let Ok((mut health, mut animator, stats, collider, physics, abilities, locomotion, already_dead)) =
            players.get_mut(event.target)
        else {
            continue;
        };
        if already_dead {
            continue;
        }

        let was_alive = health.is_alive();
        let resistance = stats.map_or(1.0, |s| s.resistance);
        let amount = resisted_damage(event.amount, resistance);
        health.take_damage(amount);

        crate::log(&format!(
            "💥 Player {:?} took {:.1} damage (HP: {:.1}/{:.1})",
            event.target, amount, health.current, health.max
        ));

        if !was_alive || health.is_alive() {
            continue;
        }

        // Death transition
        if let Some(mut collider) = collider {
            collider.enabled = false;
        }
        if let Some(mut physics) = physics {
            physics.kinematic = true;
        }
        if let Some(mut locomotion) = locomotion {
            locomotion.velocity = Vec3::ZERO;
        }
        if let Some(mut abilities) = abilities {
            if let Some(kind) = abilities.cancel() {
                crate::log(&format!("Player {:?}: {:?} cancelled by death", event.target, kind));
            }
        }

        animator.apply_root_motion(true);
        animator.play(DEATH_ANIMATION, true);

        sounds.write(SoundRequested {
            source: event.target,
            cue: SoundCue::PlayerDeath,
        });
        commands
            .entity(event.target)
            .insert((Dead, DeathSequence::default()));

        crate::log_info(&format!("☠️ Player {:?} died", event.target));
    }
}

/// Система: death sequence (announce → restart)
///
/// В tick'е смерти sequence не продвигается: задержки считаются со следующего tick'а.
pub fn advance_death_sequences(
    mut commands: Commands,
    time: Res<Time>,
    mut sequences: Query<(Entity, &mut DeathSequence)>,
    mut died_events: EventWriter<PlayerDied>,
    mut restart_events: EventWriter<SceneRestartRequested>,
) {
    let delta = time.delta();

    for (entity, mut sequence) in sequences.iter_mut() {
        if sequence.is_added() {
            continue;
        }

        match sequence.tick(delta) {
            Some(DeathStep::Announce) => {
                crate::log_info("You Died");
                died_events.write(PlayerDied { entity });
            }
            Some(DeathStep::Restart) => {
                commands.entity(entity).despawn();
                restart_events.write(SceneRestartRequested { despawned: entity });
                crate::log_info(&format!("Player {:?} despawned, restart requested", entity));
            }
            None => {}
        }
    }
}
