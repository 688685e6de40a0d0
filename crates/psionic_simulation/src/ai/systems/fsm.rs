//! Enemy FSM: выбор состояния из PerceptionSnapshot.

use bevy::prelude::*;

use crate::ai::{EnemyBehavior, EnemyState};

/// Система: Patrol/Chase/Attack transitions
///
/// Состояние полностью определяется текущим snapshot'ом (без гистерезиса).
/// Порядок приоритетов:
/// 1. Attack (игрок в attack range)
/// 2. Chase (игрок в sight range)
/// 3. Patrol
pub fn select_enemy_states(mut enemies: Query<(Entity, &mut EnemyBehavior)>) {
    for (entity, mut behavior) in enemies.iter_mut() {
        let new_state = EnemyState::select(behavior.perception);
        if new_state == behavior.state {
            continue;
        }

        crate::log(&format!(
            "AI: {:?} {} → {} (sight: {}, attack: {})",
            entity,
            behavior.state.as_str(),
            new_state.as_str(),
            behavior.perception.in_sight_range,
            behavior.perception.in_attack_range
        ));
        behavior.state = new_state;
    }
}
