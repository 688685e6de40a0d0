//! Damage intake для врагов
//!
//! Движок присылает DamageReceived после collision detection.
//! Игрок обрабатывает свой урон сам (resistance + death sequence, см. player::death).

use bevy::prelude::*;

use crate::combat::{DamageReceived, EnemyDied};
use crate::components::{Dead, Health, NavAgent, Player};

/// Урон после resistance (resistance ≤ 0 трактуем как 1)
pub fn resisted_damage(amount: f32, resistance: f32) -> f32 {
    if resistance > 0.0 {
        amount / resistance
    } else {
        amount
    }
}

/// Система: урон врагам + смерть
///
/// При смерти: маркер Dead, NavAgent выключен (AI behaviors останавливаются,
/// aim layer уходит в 0), EnemyDied для движка.
pub fn apply_enemy_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageReceived>,
    mut died_events: EventWriter<EnemyDied>,
    mut enemies: Query<(&mut Health, Option<&mut NavAgent>, Has<Dead>), Without<Player>>,
) {
    for event in damage_events.read() {
        let Ok((mut health, nav, already_dead)) = enemies.get_mut(event.target) else {
            continue;
        };
        if already_dead {
            continue;
        }

        let was_alive = health.is_alive();
        health.take_damage(event.amount);

        crate::log(&format!(
            "💥 Enemy {:?} took {:.1} damage (HP: {:.1})",
            event.target, event.amount, health.current
        ));

        if was_alive && !health.is_alive() {
            if let Some(mut nav) = nav {
                nav.set_enabled(false);
                nav.destination = None;
            }
            commands.entity(event.target).insert(Dead);
            died_events.write(EnemyDied {
                entity: event.target,
                killer: event.attacker,
            });

            crate::log_info(&format!("☠️ Enemy {:?} died", event.target));
        }
    }
}
