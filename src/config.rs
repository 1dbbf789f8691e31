//! Flow controller configuration
//!
//! Loaded from a JSON file; every field is optional and falls back to the
//! defaults below.

use crate::save::SlotId;
use crate::workflow::LoadingDurations;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Number of save slots; ids run from 1 to this value
    pub slot_count: SlotId,
    pub new_game_delay_ms: u64,
    pub load_game_delay_ms: u64,
    pub save_game_delay_ms: u64,
    /// Where slot files live; `None` uses [`default_save_directory`]
    pub save_directory: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl FlowConfig {
    /// Loads and validates a JSON config file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config: FlowConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// New Game must be the longest wait and Save the shortest
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slot_count == 0 {
            return Err(ConfigError::Invalid("slot_count must be at least 1".to_string()));
        }
        if !(self.new_game_delay_ms > self.load_game_delay_ms
            && self.load_game_delay_ms > self.save_game_delay_ms)
        {
            return Err(ConfigError::Invalid(format!(
                "delays must satisfy new game ({}) > load ({}) > save ({})",
                self.new_game_delay_ms, self.load_game_delay_ms, self.save_game_delay_ms
            )));
        }
        Ok(())
    }

    pub fn loading_durations(&self) -> LoadingDurations {
        LoadingDurations {
            new_game: Duration::from_millis(self.new_game_delay_ms),
            load_game: Duration::from_millis(self.load_game_delay_ms),
            save_game: Duration::from_millis(self.save_game_delay_ms),
        }
    }

    pub fn resolved_save_directory(&self) -> PathBuf {
        self.save_directory
            .clone()
            .unwrap_or_else(default_save_directory)
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        FlowConfig {
            slot_count: 6,
            new_game_delay_ms: 3000,
            load_game_delay_ms: 2500,
            save_game_delay_ms: 2000,
            save_directory: None,
        }
    }
}

/// `~/.novel-flow/saves`, or `./saves` when there is no home directory
pub fn default_save_directory() -> PathBuf {
    dirs::home_dir()
        .map(|p| p.join(".novel-flow/saves"))
        .unwrap_or_else(|| PathBuf::from("./saves"))
}
