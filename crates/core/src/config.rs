//! Engine tunables
//!
//! Every game-design constant the engine uses lives here, with the defaults from
//! the types crate. Configs are plain serde structs and can be loaded from TOML:
//!
//! ```toml
//! win_value = 1024
//! combo_window_ms = 1200
//!
//! [danger]
//! warning_max_empty = 5
//! ```
//!
//! Missing keys keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::danger::DangerThresholds;
use crate::scoring::ScoreTuning;
use crate::types::{
    COMBO_WINDOW_MS, DEFAULT_UNDO_LIMIT, FEVER_COMBO_THRESHOLD, FEVER_MULTIPLIER,
    FEVER_TIMEOUT_MS, MILESTONES, MIN_TILE_VALUE, SPAWN_FOUR_PERMILLE, WIN_VALUE,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub win_value: u32,
    pub combo_window_ms: u64,
    pub fever_combo_threshold: u32,
    pub fever_multiplier: u32,
    pub fever_timeout_ms: u64,
    /// Chance of spawning a 4 instead of a 2, per mille
    pub spawn_four_permille: u32,
    pub milestones: Vec<u32>,
    pub danger: DangerThresholds,
    /// Undo uses per game
    pub undo_limit: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            win_value: WIN_VALUE,
            combo_window_ms: COMBO_WINDOW_MS,
            fever_combo_threshold: FEVER_COMBO_THRESHOLD,
            fever_multiplier: FEVER_MULTIPLIER,
            fever_timeout_ms: FEVER_TIMEOUT_MS,
            spawn_four_permille: SPAWN_FOUR_PERMILLE,
            milestones: MILESTONES.to_vec(),
            danger: DangerThresholds::default(),
            undo_limit: DEFAULT_UNDO_LIMIT,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Reject tunings the engine cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.win_value < 4 || !self.win_value.is_power_of_two() {
            return Err(invalid(
                "win_value",
                format!("{} is not a power of two >= 4", self.win_value),
            ));
        }
        if self.combo_window_ms == 0 {
            return Err(invalid("combo_window_ms", "must be positive"));
        }
        if self.fever_combo_threshold == 0 {
            return Err(invalid("fever_combo_threshold", "must be positive"));
        }
        if self.fever_multiplier == 0 {
            return Err(invalid("fever_multiplier", "must be at least 1"));
        }
        if self.fever_timeout_ms <= self.combo_window_ms {
            return Err(invalid(
                "fever_timeout_ms",
                format!(
                    "{}ms must be longer than the combo window ({}ms)",
                    self.fever_timeout_ms, self.combo_window_ms
                ),
            ));
        }
        if self.spawn_four_permille > 1000 {
            return Err(invalid(
                "spawn_four_permille",
                format!("{} exceeds 1000", self.spawn_four_permille),
            ));
        }
        if let Some(bad) = self
            .milestones
            .iter()
            .find(|v| **v < MIN_TILE_VALUE * 2 || !v.is_power_of_two())
        {
            return Err(invalid(
                "milestones",
                format!("{} is not a value a merge can produce", bad),
            ));
        }
        let d = &self.danger;
        if !(d.warning_max_empty > d.critical_max_empty
            && d.critical_max_empty > d.imminent_max_empty)
        {
            return Err(invalid(
                "danger",
                "thresholds must strictly decrease from warning to imminent",
            ));
        }
        Ok(())
    }

    pub fn score_tuning(&self) -> ScoreTuning {
        ScoreTuning {
            combo_window_ms: self.combo_window_ms,
            fever_combo_threshold: self.fever_combo_threshold,
            fever_multiplier: self.fever_multiplier,
            fever_timeout_ms: self.fever_timeout_ms,
        }
    }

    pub fn is_milestone(&self, value: u32) -> bool {
        self.milestones.contains(&value)
    }
}
