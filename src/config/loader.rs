//! Configuration loader for notify-relay
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from the file and the environment with proper precedence.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};

use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Configuration file read when neither `--config` nor the environment names one
pub const DEFAULT_CONFIG_FILE: &str = "/etc/notify-relay/config.toml";

/// Environment variable for a specific configuration file
const CONFIG_FILE_ENV: &str = "NOTIFY_RELAY_CONFIG_FILE";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "NOTIFY_RELAY";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader
///
/// Sources, in order of priority:
/// 1. Built-in defaults
/// 2. The configuration file
/// 3. `NOTIFY_RELAY_*` environment variables (highest priority)
///
/// The default file is optional. A file named explicitly, through
/// `--config` or `NOTIFY_RELAY_CONFIG_FILE`, must exist.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_file: PathBuf,
    required: bool,
}

impl ConfigLoader {
    /// Create a loader for the file named by `NOTIFY_RELAY_CONFIG_FILE`,
    /// or the default path when the variable is unset
    pub fn new() -> Self {
        match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::with_file(path),
            _ => Self {
                config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
                required: false,
            },
        }
    }

    /// Create a loader for an explicit configuration file
    pub fn with_file<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config_file: path.into(),
            required: true,
        }
    }

    /// Path of the configuration file this loader reads
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Load, merge and validate settings from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - an explicitly named file does not exist
    /// - parsing or deserialization fails
    /// - the merged settings fail validation
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        if self.required && !self.config_file.exists() {
            return Err(ConfigError::file_not_found(
                self.config_file.display().to_string(),
            ));
        }

        if !self.config_file.exists() {
            tracing::debug!(
                path = %self.config_file.display(),
                "No configuration file found, using defaults"
            );
        }

        // NOTIFY_RELAY_HTTP__TIMEOUT_SECONDS -> http.timeout_seconds
        Config::builder()
            .add_source(
                File::new(&self.config_file.to_string_lossy(), FileFormat::Toml)
                    .required(self.required),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()
            .map_err(ConfigError::from)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
