//! Flingable capability — актор может получить принудительное смещение
//!
//! ECS считает impulse и копит его в `pending_impulse`,
//! движок забирает (`take_impulse`) и применяет к физике/агенту.

use bevy::prelude::*;

use crate::combat::FlingDirection;

/// Capability: актор принимает externally-applied displacement
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Flingable {
    /// Сила fling (м/с impulse)
    pub strength: f32,

    /// Накопленный impulse (ещё не применён движком)
    pub pending_impulse: Vec3,

    /// Сколько раз актора отбрасывали (телеметрия/тесты)
    pub times_flung: u32,
}

impl Default for Flingable {
    fn default() -> Self {
        Self {
            strength: 12.0,
            pending_impulse: Vec3::ZERO,
            times_flung: 0,
        }
    }
}

impl Flingable {
    /// Применяет fling от источника. Возвращает добавленный impulse.
    ///
    /// Направление горизонтальное: Forwards — к источнику, Backwards — от него.
    /// Если актор стоит в источнике, используется `source_forward`.
    pub fn fling(
        &mut self,
        direction: FlingDirection,
        source_position: Vec3,
        source_forward: Vec3,
        own_position: Vec3,
    ) -> Vec3 {
        let mut away = own_position - source_position;
        away.y = 0.0;
        let away = if away.length_squared() > f32::EPSILON {
            away.normalize()
        } else {
            Vec3::new(source_forward.x, 0.0, source_forward.z).normalize_or_zero()
        };

        let impulse = match direction {
            FlingDirection::Forwards => -away * self.strength,
            FlingDirection::Backwards => away * self.strength,
        };

        self.pending_impulse += impulse;
        self.times_flung += 1;
        impulse
    }

    pub fn take_impulse(&mut self) -> Vec3 {
        std::mem::take(&mut self.pending_impulse)
    }
}
