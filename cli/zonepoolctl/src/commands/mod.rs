//! CLI commands.

mod config;
mod pools;
mod schedule;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// zonepoolctl - inspect and dry-run zone placement.
#[derive(Debug, Parser)]
#[command(name = "zonepoolctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json).
    #[arg(long, global = true, default_value = "table")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate and inspect scheduler configuration.
    Config(config::ConfigCommand),

    /// Inspect pool definitions.
    Pools(pools::PoolsCommand),

    /// Dry-run placement of a zone.
    Schedule(schedule::ScheduleArgs),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Run the CLI command.
    pub fn run(self) -> Result<()> {
        let ctx = CommandContext {
            format: self.format,
        };

        match self.command {
            Commands::Config(cmd) => cmd.run(ctx),
            Commands::Pools(cmd) => cmd.run(ctx),
            Commands::Schedule(args) => schedule::run(ctx, args),
            Commands::Version => {
                println!("zonepoolctl {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub format: OutputFormat,
}
