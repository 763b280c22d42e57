//! Game configuration.
//!
//! Every field has a default, so a config file only needs to list the
//! values it changes.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::PLAYER_COUNT;

/// Errors that can occur while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("portal bonus range {min}..={max} is empty")]
    EmptyBonusRange { min: u32, max: u32 },

    #[error("deer mode must last at least one turn, got {0}")]
    DeerModeTooShort(i32),
}

/// Tunable rules and seat assignments for a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// PRNG seed; a fresh entropy seed is used when absent.
    pub seed: Option<u64>,
    /// Which seats are human at the start of setup.
    pub humans: [bool; PLAYER_COUNT],
    /// How long an AI "thinks" before rolling or moving.
    pub ai_think_ms: u64,
    /// Turns left on the clock once deer mode starts.
    pub deer_mode_turns: i32,
    /// Cash bonus range for the first player through a portal.
    pub portal_bonus_min: u32,
    pub portal_bonus_max: u32,
    /// Park in the round summary screen between rounds.
    pub pause_between_rounds: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            seed: None,
            humans: [true, false, false, false],
            ai_think_ms: 1000,
            deer_mode_turns: 16,
            portal_bonus_min: 5,
            portal_bonus_max: 6,
            pause_between_rounds: false,
        }
    }
}

impl GameConfig {
    /// Loads and validates a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&data)
    }

    /// Parses and validates a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the ranges are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.portal_bonus_min > self.portal_bonus_max {
            return Err(ConfigError::EmptyBonusRange {
                min: self.portal_bonus_min,
                max: self.portal_bonus_max,
            });
        }
        if self.deer_mode_turns < 1 {
            return Err(ConfigError::DeerModeTooShort(self.deer_mode_turns));
        }
        Ok(())
    }

    /// AI thinking time as a duration.
    pub fn ai_think_time(&self) -> Duration {
        Duration::from_millis(self.ai_think_ms)
    }

    /// A config with every seat played by the AI.
    pub fn all_ai(seed: u64) -> Self {
        GameConfig {
            seed: Some(seed),
            humans: [false; PLAYER_COUNT],
            ..GameConfig::default()
        }
    }
}
