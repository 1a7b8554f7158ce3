//! zonepoolctl - operator CLI for the zone placement scheduler
//!
//! Works offline against local files: validates scheduler configuration,
//! inspects pool definitions and dry-runs placement of a zone.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod error;
mod output;

use commands::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Prefer RUST_LOG, fall back to ZONEPOOL_LOG_LEVEL
    let log_level = std::env::var("ZONEPOOL_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = cli.run() {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
