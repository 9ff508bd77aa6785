//! Binary crate for the `skycast` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Human-friendly output formatting

use std::process::ExitCode;

use clap::Parser;
use skycast_core::WeatherError;
use tracing_subscriber::EnvFilter;

mod cli;
mod configure;
mod render;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cmd = cli::Cli::parse();
    match cmd.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

/// Logs go to stderr so stdout stays clean for forecasts and `--json`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn report(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<WeatherError>() {
        Some(weather) => {
            eprintln!("{}", weather.user_message());
            eprintln!("  ({weather})");
            if weather.is_not_found() { ExitCode::from(2) } else { ExitCode::FAILURE }
        }
        None => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
