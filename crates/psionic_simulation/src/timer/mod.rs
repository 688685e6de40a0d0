//! AbilityTimer — кооперативная отложенная continuation
//!
//! Заменяет coroutine waits: владелец армит таймер с payload (что делать дальше),
//! каждый tick продвигает его на delta, и ровно один раз получает payload обратно.
//! Используется ability sequences, attack cooldown и death sequence.

use bevy::prelude::*;
use std::time::Duration;

/// Одноразовый отменяемый таймер с payload
///
/// Инварианты:
/// - payload выдаётся максимум один раз на каждый `arm`
/// - после выдачи таймер автоматически disarmed (можно армить заново)
/// - `cancel` гарантирует что pending payload не будет выдан
#[derive(Debug, Clone)]
pub struct AbilityTimer<T> {
    pending: Option<(Timer, T)>,
}

impl<T> Default for AbilityTimer<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> AbilityTimer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Армит таймер. Предыдущий pending payload (если был) отбрасывается.
    pub fn arm(&mut self, duration: Duration, payload: T) {
        self.pending = Some((Timer::new(duration, TimerMode::Once), payload));
    }

    /// Отменяет pending payload, возвращает его владельцу (если был)
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, payload)| payload)
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn payload(&self) -> Option<&T> {
        self.pending.as_ref().map(|(_, payload)| payload)
    }

    pub fn elapsed(&self) -> Duration {
        self.pending
            .as_ref()
            .map(|(timer, _)| timer.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    pub fn remaining(&self) -> Duration {
        self.pending
            .as_ref()
            .map(|(timer, _)| timer.remaining())
            .unwrap_or(Duration::ZERO)
    }

    /// Продвигает simulated time. Возвращает payload ровно в тот tick,
    /// когда накопленное время достигло duration.
    pub fn tick(&mut self, delta: Duration) -> Option<T> {
        let (timer, _) = self.pending.as_mut()?;
        timer.tick(delta);

        if timer.finished() {
            self.cancel()
        } else {
            None
        }
    }
}

/// Секунды из конфига → Duration (отрицательные/NaN значения = 0)
pub fn secs(value: f32) -> Duration {
    Duration::try_from_secs_f32(value).unwrap_or(Duration::ZERO)
}
