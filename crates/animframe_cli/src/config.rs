//! Animation file handling

use animframe_animation::{AnimationSpec, IterationValue, SpeedValue};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level animation file (e.g. `animation.toml`)
#[derive(Debug, Deserialize, Serialize)]
pub struct AnimationFile {
    pub animation: AnimationSpec,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Terminal rendering options
#[derive(Debug, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Progress bar width in cells
    #[serde(default = "default_width")]
    pub width: usize,
    /// Character used for the filled part of the bar
    #[serde(default = "default_fill")]
    pub fill: char,
}

fn default_width() -> usize {
    40
}

fn default_fill() -> char {
    '#'
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            fill: default_fill(),
        }
    }
}

impl AnimationFile {
    /// Load an animation description from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "No animation file at {}. Run `animframe init` to create one.",
                path.display()
            );
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// A starter file that exercises a repeating, overshooting curve
    pub fn example() -> Self {
        Self {
            animation: AnimationSpec {
                duration: SpeedValue::Named("slow".to_string()),
                easing: Some("easeOutBounce".to_string()),
                iteration: Some(IterationValue::Count(2)),
            },
            display: DisplayConfig::default(),
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize animation file")
    }
}
