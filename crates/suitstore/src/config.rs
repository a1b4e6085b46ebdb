//! Configuration management for suitstore.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::snapshot::{self, DEFAULT_DIRECTORY, DEFAULT_FILE_NAME};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory name under the platform config dir.
const APP_DIR_NAME: &str = "suitstore";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "SUITSTORE_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `SUITSTORE_`, sections split on `__`)
/// 2. TOML config file at `~/.config/suitstore/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Working snapshot configuration.
    pub snapshot: SnapshotConfig,
}

/// Where the working snapshot lives and when it is read and written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Directory holding the snapshot. Blank means the current directory.
    pub directory: String,
    /// Snapshot file name. Blank means `trajes_espaciales.dat`.
    pub file_name: String,
    /// Load the snapshot before running a command.
    pub autoload: bool,
    /// Write the snapshot back after a successful change.
    pub autosave: bool,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            directory: DEFAULT_DIRECTORY.to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            autoload: true,
            autosave: true,
        }
    }
}

impl Config {
    /// Load configuration from all sources, reading the TOML file at
    /// `config_path` or at [`Config::default_config_path`] when `None`.
    ///
    /// A missing config file is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing, or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot file name is not a bare file name.
    pub fn validate(&self) -> Result<()> {
        let name = self.snapshot.file_name.trim();
        if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
            return Err(Error::ConfigValidation {
                message: format!(
                    "snapshot.file_name must be a bare file name, got '{}'",
                    self.snapshot.file_name
                ),
            });
        }
        Ok(())
    }

    /// Snapshot directory as passed to the snapshot layer.
    #[must_use]
    pub fn snapshot_directory(&self) -> Option<&str> {
        Some(self.snapshot.directory.as_str())
    }

    /// Snapshot file name as passed to the snapshot layer.
    #[must_use]
    pub fn snapshot_file_name(&self) -> Option<&str> {
        Some(self.snapshot.file_name.as_str())
    }

    /// Get the working snapshot path, resolving blank values to defaults.
    #[must_use]
    pub fn snapshot_path(&self) -> PathBuf {
        snapshot::resolve_path(self.snapshot_directory(), self.snapshot_file_name())
    }
}
