//! TOML configuration for the `slots` CLI.
//!
//! ```toml
//! [defaults]
//! min_duration_minutes = 90
//! block_minutes = 60
//! max_blocks = 8
//! timezone = "Europe/Berlin"
//! ```
//!
//! Every key is optional; command-line flags override the file.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default = "default_min_duration_minutes")]
    pub min_duration_minutes: i64,
    #[serde(default = "default_block_minutes")]
    pub block_minutes: i64,
    #[serde(default = "default_max_blocks")]
    pub max_blocks: usize,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            min_duration_minutes: default_min_duration_minutes(),
            block_minutes: default_block_minutes(),
            max_blocks: default_max_blocks(),
            timezone: default_timezone(),
        }
    }
}

fn default_min_duration_minutes() -> i64 {
    60
}

fn default_block_minutes() -> i64 {
    60
}

fn default_max_blocks() -> usize {
    8
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Config {
    /// Load from `path`, or fall back to built-in defaults when none is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&raw)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }
}
