//! # Configuration Management
//!
//! Loads analysis settings from `catch-patterns.toml`. A missing or broken
//! file never stops the tool: the defaults below are used instead and the
//! reason is logged.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "catch-patterns.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write config to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Application configuration loaded from catch-patterns.toml
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Ranking thresholds
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Limits for slow external lookups
    #[serde(default)]
    pub lookup: LookupConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Trips a bucket needs before it is preferred over thinner buckets
    pub min_trips: u64,
    /// Maximum entries in each ranked list
    pub item_limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Deadline for each guarded lookup, in milliseconds
    pub timeout_ms: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            min_trips: 3,
            item_limit: Some(5),
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        LookupConfig { timeout_ms: 5_000 }
    }
}

impl Config {
    /// Load configuration from catch-patterns.toml
    pub fn load() -> Self {
        Self::load_from_path(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from the given path, falling back to defaults
    /// if the file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!(path = %path.display(), min_trips = config.analysis.min_trips, "loaded configuration");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "invalid config file, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                info!(path = %path.display(), "no config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Write the configuration as pretty TOML
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "configuration saved");
        Ok(())
    }
}
