//! notify-relay library
//!
//! Core modules for dispatching one notification to a list of mail,
//! webhook and push service URLs.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod notifications;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
