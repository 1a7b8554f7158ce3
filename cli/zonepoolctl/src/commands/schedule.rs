//! Placement dry-run.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use zonepool_adapters::PoolYamlAdapter;
use zonepool_scheduler::{Context, FilterChain, FilterRegistry, StaticPoolRegistry, Zone};

use crate::output::{print_info, print_json, print_output, print_success, OutputFormat, PoolRow};

use super::config::load_config;
use super::pools::load_definitions;
use super::CommandContext;

#[derive(Debug, Args)]
pub struct ScheduleArgs {
    /// Scheduler config file (TOML).
    #[arg(long, value_name = "PATH", default_value = "scheduler.toml")]
    config: PathBuf,

    /// Pool definitions file (YAML).
    #[arg(long, value_name = "PATH", default_value = "pools.yaml")]
    pools: PathBuf,

    /// Zone name, e.g. example.org.
    #[arg(long)]
    zone: String,

    /// Zone attribute (repeatable), e.g. tier=gold or pool_id=<id>.
    #[arg(long = "attribute", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    attributes: Vec<(String, String)>,

    /// Capability the zone requires (repeatable).
    #[arg(long = "capability", value_name = "NAME")]
    capabilities: Vec<String>,

    /// Schedule as an administrator (allows pool_id hints).
    #[arg(long)]
    admin: bool,

    /// Require exactly one pool, as zone creation does.
    #[arg(long)]
    single: bool,
}

pub fn run(ctx: CommandContext, args: ScheduleArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    let pools = PoolYamlAdapter::pool_list(&load_definitions(&args.pools)?)?;
    let chain = FilterChain::from_config(
        &config,
        &FilterRegistry::builtin(),
        Arc::new(StaticPoolRegistry::new(pools)),
    )?;

    let zone = build_zone(&args);
    let request = if args.admin {
        Context::admin()
    } else {
        Context::default()
    };

    if args.single {
        let pool_id = chain.schedule_zone(&request, &zone)?;
        match ctx.format {
            OutputFormat::Json => print_json(&serde_json::json!({
                "zone": zone.name,
                "pool_id": pool_id,
            })),
            OutputFormat::Table => print_success(&format!("{} -> {}", zone.name, pool_id)),
        }
        return Ok(());
    }

    let selected = chain.schedule(&request, &zone)?;
    if ctx.format == OutputFormat::Table {
        print_info(&format!(
            "{} pool(s) selected for {}",
            selected.len(),
            zone.name
        ));
    }
    let rows: Vec<PoolRow> = selected.iter().map(PoolRow::from).collect();
    print_output(&rows, ctx.format);

    Ok(())
}

fn build_zone(args: &ScheduleArgs) -> Zone {
    let zone = args
        .attributes
        .iter()
        .fold(Zone::new(args.zone.as_str()), |zone, (k, v)| {
            zone.with_attribute(k.as_str(), v.as_str())
        });
    args.capabilities
        .iter()
        .fold(zone, |zone, c| zone.with_capability(c.as_str()))
}

/// Parse a `KEY=VALUE` argument.
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
