//! Error handling and display for the CLI.

use colored::Colorize;
use zonepool_adapters::AdapterError;
use zonepool_scheduler::{ConfigError, SchedulingError};

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    if let Some(config_err) = err.downcast_ref::<ConfigError>() {
        match config_err {
            ConfigError::MissingParameter {
                parameter: "default_pool_id",
                ..
            } => {
                eprintln!(
                    "\n{}",
                    "Hint: Set default_pool_id in the config or ZONEPOOL_DEFAULT_POOL_ID.".yellow()
                );
            }
            ConfigError::UnknownFilter(_) => {
                eprintln!(
                    "\n{}",
                    "Hint: Run `zonepoolctl config filters` to list available filters.".yellow()
                );
            }
            _ => {}
        }
    }

    if let Some(SchedulingError::MultiplePools { .. }) = err.downcast_ref::<SchedulingError>() {
        eprintln!(
            "\n{}",
            "Hint: Add a narrowing filter such as zone_hash or in_doubt_default_pool.".yellow()
        );
    }

    if let Some(AdapterError::ReadOnlyField { .. }) = err.downcast_ref::<AdapterError>() {
        eprintln!(
            "\n{}",
            "Hint: Remove read only fields from the pool definition.".yellow()
        );
    }
}
