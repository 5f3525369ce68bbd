//! Configuration file support for memento
//!
//! Reads from `~/.config/memento/config.toml`. Everything is optional;
//! missing or unparseable config means defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::srs::BoxIntervals;

/// Configuration structure
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Config {
    /// Review scheduling settings
    #[serde(default)]
    pub review: ReviewConfig,

    /// History ingestion settings
    #[serde(default)]
    pub ingest: IngestConfig,
}

/// Review-related configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReviewConfig {
    /// Days between reviews per Leitner box, boxes 1 through 5.
    /// Default: [0, 1, 3, 7, 21]
    #[serde(default = "default_intervals_days")]
    pub intervals_days: [i64; 5],
}

/// Ingestion-related configuration
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct IngestConfig {
    /// History files to read instead of the default ~/.zsh_history and
    /// ~/.bash_history.
    #[serde(default)]
    pub history_files: Vec<PathBuf>,
}

fn default_intervals_days() -> [i64; 5] {
    BoxIntervals::DEFAULT_DAYS
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            intervals_days: default_intervals_days(),
        }
    }
}

impl Config {
    /// Load config from the config directory.
    /// Returns default config if the file doesn't exist or doesn't parse.
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if let Ok(contents) = std::fs::read_to_string(&path) {
                if let Ok(config) = toml::from_str(&contents) {
                    return config;
                }
            }
        }
        Self::default()
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("memento").join("config.toml"))
    }

    /// The interval table the scheduler should use.
    pub fn intervals(&self) -> BoxIntervals {
        BoxIntervals::from_days(self.review.intervals_days)
    }
}
