//! Configuration types for grid sizing and content languages.
//!
//! Configuration is plain TOML, deserialized with serde. A missing file
//! yields the built-in defaults so a fresh checkout works without any
//! setup. Nothing in here is process-global: callers pass the loaded
//! values into constructors explicitly.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::DEFAULT_LANGUAGE;

/// Bounds and default for the on-screen segment unit size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentSizing {
    /// Unit size applied to freshly created grids.
    #[serde(default = "default_initial_size")]
    pub initial: f64,
    /// Smallest allowed unit size (zoom-out limit).
    #[serde(default = "default_min_size")]
    pub min: f64,
    /// Largest allowed unit size (zoom-in limit).
    #[serde(default = "default_max_size")]
    pub max: f64,
}

fn default_initial_size() -> f64 {
    30.0
}

fn default_min_size() -> f64 {
    10.0
}

fn default_max_size() -> f64 {
    100.0
}

impl Default for SegmentSizing {
    fn default() -> Self {
        Self {
            initial: default_initial_size(),
            min: default_min_size(),
            max: default_max_size(),
        }
    }
}

impl SegmentSizing {
    /// Clamps a requested unit size into the `[min, max]` interval.
    #[must_use]
    pub fn clamp(&self, size: f64) -> f64 {
        if size < self.min {
            self.min
        } else if size > self.max {
            self.max
        } else {
            size
        }
    }
}

/// Editor-facing configuration for the room model core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Segment sizing bounds.
    #[serde(default)]
    pub segment: SegmentSizing,
    /// Language used when a requested content language is absent.
    #[serde(default = "default_language")]
    pub default_language: String,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            segment: SegmentSizing::default(),
            default_language: default_language(),
        }
    }
}

impl ModelConfig {
    /// Parses configuration from a TOML string.
    ///
    /// Missing fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid TOML or the parsed
    /// values fail validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the values fail validation.
    pub fn to_toml_string(&self) -> Result<String> {
        self.validate()?;
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Loads configuration from a TOML file.
    ///
    /// Returns the defaults when the file does not exist.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed,
    /// or if the parsed values fail validation.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Saves configuration to a TOML file.
    ///
    /// The file is written to a temporary sibling first and renamed into
    /// place, so readers never observe a half-written config.
    ///
    /// # Errors
    ///
    /// Returns an error if the values fail validation or the file cannot
    /// be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml_string()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let temp_path = path.with_extension("toml.tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write config file: {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to move config into place: {}", path.display()))?;

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if the sizing bounds are not finite and positive,
    /// if `min` exceeds `max`, or if the default language is empty.
    pub fn validate(&self) -> Result<()> {
        let sizing = &self.segment;
        if !sizing.min.is_finite() || !sizing.max.is_finite() || !sizing.initial.is_finite() {
            anyhow::bail!("Segment sizing values must be finite numbers");
        }
        if sizing.min <= 0.0 {
            anyhow::bail!("Minimum segment size must be positive, got {}", sizing.min);
        }
        if sizing.min > sizing.max {
            anyhow::bail!(
                "Minimum segment size {} exceeds maximum {}",
                sizing.min,
                sizing.max
            );
        }
        if self.default_language.trim().is_empty() {
            anyhow::bail!("Default language must not be empty");
        }
        Ok(())
    }
}
