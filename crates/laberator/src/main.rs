//! `laberator` - operator CLI for the account directory.
//!
//! Opens the directory once per invocation and runs a single command.
//! Failing to open the store ends the process immediately.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod cli;

use std::process::ExitCode;

use clap::Parser;
use laberator_accounts::AccountDirectory;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "laberator=info,laberator_accounts=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match cli.directory_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{e:#}");
            std::process::exit(1);
        }
    };

    let directory = match AccountDirectory::open(&config).await {
        Ok(directory) => directory,
        Err(e) => {
            error!("Failed to open account directory: {e}");
            std::process::exit(1);
        }
    };

    let outcome = cli::run(&directory, cli.command).await;
    directory.close().await;

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
