//! Simulation settings (RON)
//!
//! Один файл на запуск: tick rate, seed, уровень логов и дефолты
//! для EnemyConfig / PlayerStatsConfig / LocomotionConfig.
//! Все поля опциональны — пропущенные берутся из Default.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::ai::EnemyConfig;
use crate::logger::LogLevel;
use crate::player::{LocomotionConfig, PlayerStatsConfig};

/// Ошибки загрузки настроек
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Настройки симуляции
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Частота FixedUpdate (Гц)
    pub tick_hz: f64,
    /// Seed DeterministicRng
    pub seed: u64,
    pub log_level: LogLevel,
    pub enemy: EnemyConfig,
    pub player: PlayerStatsConfig,
    pub locomotion: LocomotionConfig,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,
            seed: 42,
            log_level: LogLevel::Info,
            enemy: EnemyConfig::default(),
            player: PlayerStatsConfig::default(),
            locomotion: LocomotionConfig::default(),
        }
    }
}

impl SimulationSettings {
    /// Парсинг + валидация RON строки
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let settings: SimulationSettings = ron::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Загрузка из файла
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let settings = Self::from_ron_str(&contents)?;
        crate::log_info(&format!("Loaded settings from {:?}", path));
        Ok(settings)
    }

    /// Длительность одного tick'а
    pub fn tick_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.tick_hz)
    }

    /// Проверка диапазонов
    ///
    /// attack_range > sight_range допустим (враг атакует без "вижу"),
    /// но почти всегда опечатка — пишем warning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_hz.is_finite() && self.tick_hz > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "tick_hz must be positive, got {}",
                self.tick_hz
            )));
        }

        let enemy = &self.enemy;
        let positive = [
            ("enemy.sight_range", enemy.sight_range),
            ("enemy.attack_range", enemy.attack_range),
            ("enemy.leash_radius", enemy.leash_radius),
            ("enemy.ground_probe_length", enemy.ground_probe_length),
            ("enemy.arrival_radius", enemy.arrival_radius),
            ("enemy.turn_rate", enemy.turn_rate),
            ("enemy.aim_blend_rate", enemy.aim_blend_rate),
            ("player.starting_health", self.player.starting_health),
            ("player.resistance", self.player.resistance),
            ("player.experience_step", self.player.experience_step),
            ("locomotion.movement_speed", self.locomotion.movement_speed),
            ("locomotion.rotation_speed", self.locomotion.rotation_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        let non_negative = [
            ("enemy.walk_point_range", enemy.walk_point_range),
            ("enemy.walk_speed", enemy.walk_speed),
            ("enemy.chase_speed", enemy.chase_speed),
            ("enemy.time_between_attacks", enemy.time_between_attacks),
            ("enemy.projectile_speed", enemy.projectile_speed),
            ("player.starting_special", self.player.starting_special),
            ("player.special_regen_rate", self.player.special_regen_rate),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
        }

        if !(0.0..=1.0).contains(&enemy.aim_threshold) {
            return Err(ConfigError::Invalid(format!(
                "enemy.aim_threshold must be in [0, 1], got {}",
                enemy.aim_threshold
            )));
        }

        if enemy.attack_range > enemy.sight_range {
            crate::log_warning(&format!(
                "enemy.attack_range ({}) > enemy.sight_range ({}): enemies will attack targets they cannot see",
                enemy.attack_range, enemy.sight_range
            ));
        }

        Ok(())
    }
}
