//! Scheduler configuration commands.
//!
//! These commands operate purely on local files (offline).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tracing::debug;
use zonepool_scheduler::{FilterChain, FilterRegistry, SchedulerConfig, StaticPoolRegistry};

use crate::output::{print_info, print_json, print_success, OutputFormat};

use super::CommandContext;

/// Configuration commands.
#[derive(Debug, Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
enum ConfigSubcommand {
    /// Build the filter chain from a config file and report its order.
    Validate(ValidateArgs),

    /// List the filters that can be enabled.
    Filters,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Scheduler config file (TOML).
    #[arg(long, value_name = "PATH", default_value = "scheduler.toml")]
    config: PathBuf,
}

impl ConfigCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            ConfigSubcommand::Validate(args) => validate(ctx, args),
            ConfigSubcommand::Filters => list_filters(ctx),
        }
    }
}

/// Load a config file and apply environment overrides.
pub(crate) fn load_config(path: &Path) -> Result<SchedulerConfig> {
    debug!(path = %path.display(), "Loading scheduler config");
    let config = SchedulerConfig::load(path)?
        .apply_env()
        .context("invalid scheduler environment override")?;
    Ok(config)
}

fn validate(ctx: CommandContext, args: ValidateArgs) -> Result<()> {
    let config = load_config(&args.config)?;

    // No pools are needed to prove the chain can be built.
    let chain = FilterChain::from_config(
        &config,
        &FilterRegistry::builtin(),
        Arc::new(StaticPoolRegistry::default()),
    )?;

    match ctx.format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "valid": true,
                "filters": chain.filter_names(),
                "default_pool_id": config.default_pool_id,
            });
            print_json(&out);
        }
        OutputFormat::Table => {
            print_success(&format!("Config is valid: {}", args.config.display()));
            print_info(&format!("filters: {}", chain.filter_names().join(" -> ")));
            if let Some(pool_id) = &config.default_pool_id {
                print_info(&format!("default_pool_id: {pool_id}"));
            }
        }
    }

    Ok(())
}

fn list_filters(ctx: CommandContext) -> Result<()> {
    let registry = FilterRegistry::builtin();
    let names: Vec<&str> = registry.names().collect();

    match ctx.format {
        OutputFormat::Json => print_json(&names),
        OutputFormat::Table => {
            for name in names {
                println!("{name}");
            }
        }
    }

    Ok(())
}
