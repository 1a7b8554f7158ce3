//! Error types for scheduling.
//!
//! Configuration errors surface when a chain is built and are fatal to
//! scheduler startup. Everything else surfaces per `schedule` call.

use std::path::PathBuf;

use thiserror::Error;
use zonepool_id::PoolId;

/// Result type for scheduling operations.
pub type SchedulerResult<T> = Result<T, SchedulingError>;

/// A pool list invariant was violated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PoolListError {
    /// The same pool ID appeared twice in one list.
    #[error("duplicate pool in list: {0}")]
    DuplicatePool(PoolId),
}

/// Errors raised while building a filter chain.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("invalid scheduler config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value was present but could not be used.
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// The configured filter list is empty.
    #[error("no scheduling filters configured")]
    NoFiltersConfigured,

    /// A configured filter name has no registered factory.
    #[error("unknown scheduling filter: {0}")]
    UnknownFilter(String),

    /// A filter name appears more than once in the configured order.
    #[error("scheduling filter listed more than once: {0}")]
    DuplicateFilter(String),

    /// A factory was registered twice under the same name.
    #[error("scheduling filter already registered: {0}")]
    DuplicateRegistration(String),

    /// A filter requires a parameter that is not configured.
    #[error("filter '{filter}' requires '{parameter}' to be configured")]
    MissingParameter {
        filter: &'static str,
        parameter: &'static str,
    },
}

/// Errors raised by a filter while narrowing the candidate set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// The caller is not allowed to request this placement.
    #[error("forbidden: {reason}")]
    Forbidden { reason: String },

    /// The filter produced a list that violates pool list invariants.
    #[error("malformed pool list: {0}")]
    MalformedPoolList(#[from] PoolListError),

    /// Any other internal invariant violation.
    #[error("filter invariant violated: {0}")]
    Invariant(String),
}

/// Errors from the pool registry collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The registry could not produce the pool universe.
    #[error("pool registry unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur during a scheduling call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    /// The pool universe could not be loaded.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A filter failed; the placement is aborted.
    #[error("filter '{filter}' failed: {source}")]
    Filter {
        filter: &'static str,
        #[source]
        source: FilterError,
    },

    /// No pool survived the chain.
    #[error("there are no pools that matched the request")]
    NoValidPool,

    /// More than one pool survived where exactly one was required.
    #[error("multiple pools matched the request ({count})")]
    MultiplePools { count: usize },
}

impl SchedulingError {
    /// Returns true if the error means no placement was found, as opposed
    /// to a failure inside the chain.
    pub fn is_no_placement(&self) -> bool {
        matches!(self, Self::NoValidPool | Self::MultiplePools { .. })
    }
}
