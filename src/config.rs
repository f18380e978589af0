//! Configuration management for ECS Exec.
//!
//! This module handles loading the optional preferences file located at
//! `~/.ecsexec/config.json`. The file only supplies default values for the
//! command-line flags and is never written by the tool.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Preferences read from the config file.
///
/// All keys are optional; anything missing falls through to the flags,
/// the AWS profile's defaults, or an interactive prompt.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Default AWS region (e.g., "us-east-1")
    #[serde(default)]
    pub region: Option<String>,

    /// Default AWS profile name from the AWS CLI configuration
    #[serde(default)]
    pub profile: Option<String>,

    /// Default command to run inside the container
    #[serde(default)]
    pub command: Option<String>,
}

impl Config {
    /// Returns the path to the configuration directory (~/.ecsexec/)
    pub fn config_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;
        Ok(home_dir.join(".ecsexec"))
    }

    /// Returns the path to the configuration file (~/.ecsexec/config.json)
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Loads the configuration from the default location.
    ///
    /// Never fails: a missing file yields an empty configuration, and any
    /// read or parse problem is logged as a warning before falling back to
    /// an empty configuration.
    pub fn load() -> Self {
        match Self::config_file_path() {
            Ok(path) => Self::load_or_default(&path),
            Err(e) => {
                warn!("Failed to load config file: {e:#}");
                Self::default()
            }
        }
    }

    /// Loads the configuration from `path`, degrading to defaults on failure.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!("No config file at {}", path.display());
            return Self::default();
        }

        match Self::load_from(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Failed to load config file: {e:#}");
                Self::default()
            }
        }
    }

    /// Reads and parses the configuration file at `path`.
    ///
    /// # Errors
    /// This function will return an error if:
    /// - The file cannot be read
    /// - The contents are not a JSON object with the expected keys
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path:?}"))?;

        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path:?}"))?;

        Ok(config)
    }
}
