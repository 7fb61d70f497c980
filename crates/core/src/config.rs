// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process configuration loaded from TOML
//!
//! ```toml
//! state_dir = "/var/lib/yard"
//! log_filter = "info"
//!
//! [intervals]
//! clock = "1s"
//! monitor = "1s"
//! snapshot = "30s"
//! ```
//!
//! Every key is optional. Operator settings (thresholds, toggles) are not
//! configured here; they live in the persisted settings blob.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("interval '{name}' must be greater than zero")]
    ZeroInterval { name: &'static str },
}

/// Periods of the three periodic tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Intervals {
    #[serde(with = "humantime_serde")]
    pub clock: Duration,
    #[serde(with = "humantime_serde")]
    pub monitor: Duration,
    #[serde(with = "humantime_serde")]
    pub snapshot: Duration,
}

impl Default for Intervals {
    fn default() -> Self {
        Self {
            clock: Duration::from_secs(1),
            monitor: Duration::from_secs(1),
            snapshot: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct YardConfig {
    /// Where persisted blobs live; resolved by the binary when unset
    pub state_dir: Option<PathBuf>,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
    pub intervals: Intervals,
}

impl Default for YardConfig {
    fn default() -> Self {
        Self {
            state_dir: None,
            log_filter: "info".to_string(),
            intervals: Intervals::default(),
        }
    }
}

impl YardConfig {
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: YardConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let Intervals {
            clock,
            monitor,
            snapshot,
        } = self.intervals;
        for (name, value) in [("clock", clock), ("monitor", monitor), ("snapshot", snapshot)] {
            if value.is_zero() {
                return Err(ConfigError::ZeroInterval { name });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
