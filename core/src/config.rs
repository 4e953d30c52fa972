//! Keyboard configuration.
//!
//! # Example
//!
//! ```rust
//! use redpanda_core::{Config, Layer};
//!
//! let config = Config::from_toml_str("repeat_delay_ms = 300").unwrap();
//! assert_eq!(config.repeat_delay_ms, 300);
//! assert_eq!(config.repeat_interval_ms, 100);
//! assert_eq!(config.initial_layer, Layer::Lowercase);
//! ```

use crate::layer::Layer;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default delay before a held delete key starts repeating.
pub const DEFAULT_REPEAT_DELAY_MS: u64 = 400;

/// Default period between repeated deletes.
pub const DEFAULT_REPEAT_INTERVAL_MS: u64 = 100;

/// Keyboard settings. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Layer shown at start and after a reset
    pub initial_layer: Layer,

    /// Delay before a held key starts repeating (ms)
    pub repeat_delay_ms: u64,

    /// Period between repeats (ms). Must be non-zero.
    pub repeat_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_layer: Layer::Lowercase,
            repeat_delay_ms: DEFAULT_REPEAT_DELAY_MS,
            repeat_interval_ms: DEFAULT_REPEAT_INTERVAL_MS,
        }
    }
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("in config {}", path.display()))
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("parsing keyboard config")?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serializing keyboard config")
    }

    /// Reject settings the repeat timer cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.repeat_interval_ms == 0 {
            bail!("repeat_interval_ms must be greater than zero");
        }
        Ok(())
    }

    /// Repeat delay as a `Duration`.
    pub fn repeat_delay(&self) -> Duration {
        Duration::from_millis(self.repeat_delay_ms)
    }

    /// Repeat interval as a `Duration`.
    pub fn repeat_interval(&self) -> Duration {
        Duration::from_millis(self.repeat_interval_ms)
    }
}
