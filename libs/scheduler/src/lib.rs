//! # zonepool-scheduler
//!
//! Pool selection for zone creation.
//!
//! Given a zone and the pools known to the registry, a [`FilterChain`]
//! threads the candidate list through an ordered sequence of [`Filter`]s and
//! returns the pools that may host the zone.
//!
//! ## Invariants
//!
//! - Scheduling is deterministic given the same context, zone, pool universe
//!   and configuration
//! - Filters never mutate their inputs; each returns the list for the next
//! - Every configured filter runs, even after the candidate list is empty
//! - Misconfiguration is reported when the chain is built, never per call
//!
//! ## Example
//!
//! ```ignore
//! let config = SchedulerConfig::from_toml_str(r#"
//!     filters = ["capability", "fallback"]
//!     default_pool_id = "pool-42"
//! "#)?;
//! let chain = FilterChain::from_config(&config, &FilterRegistry::builtin(), registry)?;
//! let pool_id = chain.schedule_zone(&Context::default(), &Zone::new("example.org."))?;
//! ```

pub mod chain;
pub mod config;
pub mod context;
pub mod error;
pub mod filters;
pub mod objects;
pub mod registry;

pub use chain::FilterChain;
pub use config::{CapabilityConfig, SchedulerConfig};
pub use context::Context;
pub use error::{
    ConfigError, FilterError, PoolListError, RegistryError, SchedulerResult, SchedulingError,
};
pub use filters::{Filter, FilterFactory, FilterRegistry};
pub use objects::{Pool, PoolList, Zone};
pub use registry::{PoolRegistry, StaticPoolRegistry};
