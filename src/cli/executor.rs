//! Run one notification from parsed CLI arguments
//!
//! This module provides the main entry point used by the binary after
//! argument parsing.

use super::parser::Cli;
use super::{load_settings, logger_config};
use crate::logger::init_logger;
use crate::notifications::{DispatchReport, DispatchRequest, NotificationDispatcher};

/// Execute a notification run
///
/// Loads settings, initializes logging, decodes the JSON arguments and
/// delivers to every destination.
///
/// # Errors
/// Returns an error for a configuration or logger failure, malformed JSON
/// arguments, or a destination asking for a body format that was not
/// provided. Individual delivery failures are not errors; they are counted
/// in the returned report.
pub async fn run(cli: &Cli) -> anyhow::Result<DispatchReport> {
    let settings = load_settings(cli)?;
    init_logger(&logger_config(cli, &settings))?;

    tracing::debug!(
        timeout_seconds = settings.http.timeout_seconds,
        default_services = settings.services.len(),
        "Configuration loaded"
    );

    let request = DispatchRequest::from_args(&cli.services, &cli.title, &cli.bodies)?
        .with_default_services(&settings.services);

    let dispatcher = NotificationDispatcher::new(&settings)?.with_dry_run(cli.dry_run);
    let report = dispatcher.dispatch(&request).await?;

    Ok(report)
}
