//! tally - command-line interface for the tally billing service.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod report;

use commands::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match commands::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_unavailable() => {
            // Distinct report so callers can choose to retry out-of-band.
            eprintln!("tally: {err}; try again later");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("tally: {err}");
            ExitCode::FAILURE
        }
    }
}
