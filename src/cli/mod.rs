//! CLI module for notify-relay
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing with clap
//! - Settings loading with CLI overrides
//! - The notification run itself

pub mod executor;
pub mod parser;
pub mod validation;

// Re-export public types for convenience
pub use executor::run;
pub use parser::{Cli, LogLevel};

use crate::config::{ConfigError, ConfigLoader, Settings};
use crate::logger::LoggerConfig;

/// Load settings from the file named by `--config`, or the default sources
///
/// # Errors
/// Returns error if configuration loading or validation fails
pub fn load_settings(cli: &Cli) -> Result<Settings, ConfigError> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::with_file(path),
        None => ConfigLoader::new(),
    };
    loader.load()
}

/// Logger configuration with the CLI level override applied
pub fn logger_config(cli: &Cli, settings: &Settings) -> LoggerConfig {
    match cli.requested_log_level() {
        Some(level) => settings.logger.clone().with_level(level),
        None => settings.logger.clone(),
    }
}
