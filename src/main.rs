use std::process::ExitCode;

use clap::Parser;
use notify_relay::cli::{self, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli::run(&cli).await {
        Ok(report) => {
            tracing::debug!(
                sent = report.sent(),
                failed = report.failed(),
                skipped = report.skipped(),
                "Run finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("An error occurred while processing notifications: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
