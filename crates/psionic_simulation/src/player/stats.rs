//! Player stats: special meter, experience/level, ammo + reload

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::{AnimationDriver, Animator, Dead, Health, Player, PlayerInput};
use crate::player::{Locomotion, ReloadPhase, ReloadSignal};

/// Стартовые характеристики игрока
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct PlayerStatsConfig {
    pub starting_health: f32,
    pub starting_special: f32,
    /// Сколько опыта нужно на первый level up (и прирост порога за уровень)
    pub experience_step: f32,
    pub resistance: f32,
    pub magazine_capacity: u32,
    /// Регенерация special (ед/с, только на земле)
    pub special_regen_rate: f32,
}

impl Default for PlayerStatsConfig {
    fn default() -> Self {
        Self {
            starting_health: 100.0,
            starting_special: 100.0,
            experience_step: 1000.0,
            resistance: 1.0,
            magazine_capacity: 12,
            special_regen_rate: 5.0,
        }
    }
}

/// Runtime характеристики игрока (health — отдельный компонент Health)
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerStats {
    pub special: f32,
    pub max_special: f32,
    pub level: u32,
    pub experience: f32,
    pub exp_to_next_level: f32,
    pub experience_step: f32,
    pub resistance: f32,
    pub magazine_capacity: u32,
    pub ammo: u32,
    pub special_regen_rate: f32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self::from_config(&PlayerStatsConfig::default())
    }
}

impl PlayerStats {
    pub fn from_config(config: &PlayerStatsConfig) -> Self {
        Self {
            special: config.starting_special,
            max_special: config.starting_special,
            level: 1,
            experience: 0.0,
            exp_to_next_level: config.experience_step,
            experience_step: config.experience_step,
            resistance: config.resistance,
            magazine_capacity: config.magazine_capacity,
            ammo: config.magazine_capacity,
            special_regen_rate: config.special_regen_rate,
        }
    }

    pub fn add_experience(&mut self, amount: f32) {
        self.experience += amount.max(0.0);
    }

    /// Регенерация special
    ///
    /// На земле и ниже max — растёт с rate/с (clamp к max).
    /// В воздухе — заморожен. Выше max (max уменьшили) — обрезаем.
    pub fn regenerate_special(&mut self, grounded: bool, delta_secs: f32) {
        if self.special < self.max_special && grounded {
            self.special = (self.special + self.special_regen_rate * delta_secs).min(self.max_special);
        } else if self.special > self.max_special {
            self.special = self.max_special;
        }
    }

    /// Один level up если опыта хватает. Возвращает true если уровень поднят.
    ///
    /// Порог растёт на experience_step, max health/special +10, оба refill.
    pub fn try_level_up(&mut self, health: &mut Health) -> bool {
        if self.experience < self.exp_to_next_level {
            return false;
        }

        self.experience -= self.exp_to_next_level;
        self.exp_to_next_level += self.experience_step;
        self.level += 1;

        health.max += 10.0;
        health.refill();
        self.max_special += 10.0;
        self.special = self.max_special;
        true
    }

    pub fn refill_ammo(&mut self) {
        self.ammo = self.magazine_capacity;
    }
}

/// Состояние перезарядки (флаги пишутся сигналами движка)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ReloadState {
    pub is_reloading: bool,
    pub started_reload: bool,
}

pub const RELOAD_ANIMATION: &str = "Reloading";

/// Система: ReloadSignal events → ReloadState флаги
pub fn apply_reload_signals(
    mut signals: EventReader<ReloadSignal>,
    mut players: Query<&mut ReloadState, With<Player>>,
) {
    for signal in signals.read() {
        let Ok(mut reload) = players.get_mut(signal.actor) else {
            continue;
        };

        match signal.phase {
            ReloadPhase::Started => reload.started_reload = true,
            ReloadPhase::Finished => {
                reload.started_reload = false;
                reload.is_reloading = false;
            }
        }
    }
}

/// Система: перезарядка
///
/// Движок сигналит start; если ещё не перезаряжаемся — снимаем прицеливание,
/// проигрываем анимацию и сразу пополняем магазин.
pub fn handle_reload(
    mut players: Query<
        (Entity, &mut ReloadState, &mut PlayerStats, &mut PlayerInput, &mut Animator),
        (With<Player>, Without<Dead>),
    >,
) {
    for (entity, mut reload, mut stats, mut input, mut animator) in players.iter_mut() {
        if !reload.started_reload || reload.is_reloading {
            continue;
        }

        reload.is_reloading = true;
        input.aim = false;
        animator.play(RELOAD_ANIMATION, false);
        stats.refill_ammo();

        crate::log(&format!("🔄 Player {:?} reloading ({} rounds)", entity, stats.ammo));
    }
}

/// Система: регенерация special meter
pub fn regenerate_special(
    time: Res<Time>,
    mut players: Query<(&mut PlayerStats, Option<&Locomotion>), (With<Player>, Without<Dead>)>,
) {
    let delta = time.delta_secs();

    for (mut stats, locomotion) in players.iter_mut() {
        let grounded = locomotion.map_or(true, |l| l.is_grounded);
        stats.regenerate_special(grounded, delta);
    }
}

/// Система: level up
pub fn level_up_players(
    mut players: Query<(Entity, &mut PlayerStats, &mut Health), (With<Player>, Without<Dead>)>,
) {
    for (entity, mut stats, mut health) in players.iter_mut() {
        if stats.experience < stats.exp_to_next_level {
            continue;
        }

        if stats.try_level_up(&mut health) {
            crate::log_info(&format!(
                "⭐ Player {:?} reached level {} (next at {:.0} exp)",
                entity, stats.level, stats.exp_to_next_level
            ));
        }
    }
}
