//! Configuration management for notify-relay
//!
//! Settings are layered (lowest to highest priority):
//! 1. Built-in defaults
//! 2. The TOML configuration file (`--config`, `NOTIFY_RELAY_CONFIG_FILE`,
//!    or `/etc/notify-relay/config.toml`)
//! 3. `NOTIFY_RELAY_*` environment variables

pub mod error;
pub mod loader;
pub mod settings;

pub use error::ConfigError;
pub use loader::{ConfigLoader, DEFAULT_CONFIG_FILE};
pub use settings::{HttpConfig, MailConfig, Settings};
