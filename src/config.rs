//! Configuration handling
//!
//! Configuration is read from `--config <path>` (or `TODO_LIST_CONFIG`) when
//! given, otherwise from `config.toml` in the platform config directory
//! (e.g. `~/.config/todo-list/config.toml`). Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Capabilities, Filter};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Optional features of the task list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FeatureConfig {
    /// Checkbox selection with bulk archive/delete
    pub bulk_selection: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            bulk_selection: true,
        }
    }
}

/// Interactive UI settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UiConfig {
    /// Filter a new session starts with
    pub default_filter: Filter,

    /// Event poll interval in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_filter: Filter::All,
            tick_rate_ms: 250,
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub features: FeatureConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Loads configuration from `explicit` if given, else from the default
    /// location. Only a missing file at the default location falls back to
    /// defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Returns the default config file path
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "todo-list", "todo-list")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Reads and parses a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }

    /// Parses and validates TOML content
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.ui.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid(
                "ui.tick_rate_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Store capabilities derived from the feature flags
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            bulk_selection: self.features.bulk_selection,
        }
    }
}
