//! Pool definition commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use zonepool_adapters::{PoolDefinition, PoolYamlAdapter};

use crate::output::{print_json, print_output, OutputFormat, PoolRow};

use super::CommandContext;

/// Pool commands.
#[derive(Debug, Args)]
pub struct PoolsCommand {
    #[command(subcommand)]
    command: PoolsSubcommand,
}

#[derive(Debug, Subcommand)]
enum PoolsSubcommand {
    /// List pools defined in a pools file.
    List(ListArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Pool definitions file (YAML).
    #[arg(long, value_name = "PATH", default_value = "pools.yaml")]
    pools: PathBuf,
}

impl PoolsCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            PoolsSubcommand::List(args) => list_pools(ctx, args),
        }
    }
}

/// Read and parse a pools file.
pub(crate) fn load_definitions(path: &Path) -> Result<Vec<PoolDefinition>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read pools file: {}", path.display()))?;
    PoolYamlAdapter::parse_document(&contents)
        .with_context(|| format!("invalid pools file: {}", path.display()))
}

fn list_pools(ctx: CommandContext, args: ListArgs) -> Result<()> {
    let definitions = load_definitions(&args.pools)?;
    // Reject duplicate IDs the same way scheduling would.
    PoolYamlAdapter::pool_list(&definitions)?;

    match ctx.format {
        OutputFormat::Json => print_json(&definitions),
        OutputFormat::Table => {
            let rows: Vec<PoolRow> = definitions.iter().map(|d| PoolRow::from(&d.pool)).collect();
            print_output(&rows, ctx.format);
        }
    }

    Ok(())
}
