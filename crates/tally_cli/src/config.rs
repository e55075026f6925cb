//! Tally configuration file handling
//!
//! `tally run` reads a `tally.toml`:
//!
//! ```toml
//! [counter]
//! from = 0
//! to = 2500000
//! duration = 2.0
//! easing = "ease-out"
//! display = "integer"
//!
//! [scheduler]
//! fps = 100
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tally_animation::DEFAULT_TARGET_FPS;
use tally_widgets::CountRequest;

/// Default file name looked up by `tally run`
pub const CONFIG_FILE: &str = "tally.toml";

#[derive(Debug, Deserialize, Serialize)]
pub struct TallyConfig {
    pub counter: CountRequest,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

/// Background scheduler settings
#[derive(Debug, Deserialize, Serialize)]
pub struct SchedulerConfig {
    #[serde(default = "default_fps")]
    pub fps: u32,
}

fn default_fps() -> u32 {
    DEFAULT_TARGET_FPS
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { fps: default_fps() }
    }
}

impl TallyConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "No {} found at {}. Pass --config to point at one.",
                CONFIG_FILE,
                path.display()
            );
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: TallyConfig = toml::from_str(content)?;
        config.counter.validate()?;
        if config.scheduler.fps == 0 {
            anyhow::bail!("scheduler.fps must be at least 1");
        }
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize tally config")
    }
}
