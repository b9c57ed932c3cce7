//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON)
//! - Environment variables

use crate::error::{Error, Result};
use clutch_network::ClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Request client settings
    pub client: ClientConfig,

    /// Page location reported as the post-login return target
    pub location: Option<String>,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Use colored output by default
    pub color: bool,

    /// Show progress indicators
    pub progress: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            progress: true,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;

        let config = if is_yaml(path) {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_first(&Self::default_config_paths())
    }

    /// Load the first existing file in `paths`. A file that exists but does
    /// not parse is an error.
    fn load_first(paths: &[PathBuf]) -> Result<Self> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => Self::from_file(path)
                .map_err(|e| Error::config(format!("Failed to load {}: {}", path.display(), e))),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file or default locations, then
    /// apply environment overrides and validate
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::load()?,
        };

        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Apply `CLUTCH_*` environment overrides
    pub fn apply_env(&mut self) {
        if let Ok(base_url) = std::env::var("CLUTCH_BASE_URL") {
            self.client.base_url = base_url;
        }
        if let Ok(location) = std::env::var("CLUTCH_LOCATION") {
            self.location = Some(location);
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.client
            .validate()
            .map_err(|e| Error::config(e.to_string()))
    }

    /// Path of the user-level config file
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("clutch").join("config.yaml"))
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".clutch.yaml"),
            PathBuf::from(".clutch.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let clutch_dir = config_dir.join("clutch");
            paths.push(clutch_dir.join("config.yaml"));
            paths.push(clutch_dir.join("config.json"));
        }

        paths
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_yaml(path) {
            serde_yaml::to_string(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    )
}
