//! Scheduling filters and the registry that builds them from configuration.
//!
//! A filter narrows, reorders or passes through the candidate pool list. It
//! receives the list by value and returns the list handed to the next filter,
//! so no filter can keep a reference to a list it does not own.
//!
//! Filters are shared across concurrent scheduling calls and must not hold
//! mutable state. Anything a filter needs is read from configuration when it
//! is built.

mod attribute;
mod capability;
mod default_pool;
mod fallback;
mod in_doubt_default_pool;
mod pool_id_attribute;
mod zone_hash;

use std::collections::BTreeMap;
use std::fmt;

pub use attribute::AttributeFilter;
pub use capability::CapabilityFilter;
pub use default_pool::DefaultPoolFilter;
pub use fallback::FallbackFilter;
pub use in_doubt_default_pool::InDoubtDefaultPoolFilter;
pub use pool_id_attribute::PoolIdAttributeFilter;
pub use zone_hash::ZoneHashFilter;

use crate::config::SchedulerConfig;
use crate::context::Context;
use crate::error::{ConfigError, FilterError};
use crate::objects::{PoolList, Zone};

/// A unit of pool selection policy.
pub trait Filter: Send + Sync + fmt::Debug {
    /// Name used to enable the filter in the `filters` config option.
    fn name(&self) -> &'static str;

    /// Narrow or pass through `pools` for `zone`.
    ///
    /// An empty result is valid. Errors abort the scheduling call.
    fn apply(&self, ctx: &Context, pools: PoolList, zone: &Zone) -> Result<PoolList, FilterError>;
}

/// Builds a filter from configuration.
pub type FilterFactory = fn(&SchedulerConfig) -> Result<Box<dyn Filter>, ConfigError>;

/// Mapping from filter name to factory, resolved once at startup.
#[derive(Clone)]
pub struct FilterRegistry {
    factories: BTreeMap<String, FilterFactory>,
}

impl FilterRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// A registry holding every built-in filter.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        let builtins: [(&str, FilterFactory); 7] = [
            (AttributeFilter::NAME, AttributeFilter::from_config),
            (CapabilityFilter::NAME, CapabilityFilter::from_config),
            (DefaultPoolFilter::NAME, DefaultPoolFilter::from_config),
            (FallbackFilter::NAME, FallbackFilter::from_config),
            (InDoubtDefaultPoolFilter::NAME, InDoubtDefaultPoolFilter::from_config),
            (PoolIdAttributeFilter::NAME, PoolIdAttributeFilter::from_config),
            (ZoneHashFilter::NAME, ZoneHashFilter::from_config),
        ];
        for (name, factory) in builtins {
            registry.factories.insert(name.to_string(), factory);
        }
        registry
    }

    /// Register a custom filter under `name`.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: FilterFactory,
    ) -> Result<(), ConfigError> {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(ConfigError::DuplicateRegistration(name));
        }
        self.factories.insert(name, factory);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Build the configured filters in order.
    pub fn build(&self, config: &SchedulerConfig) -> Result<Vec<Box<dyn Filter>>, ConfigError> {
        if config.filters.is_empty() {
            return Err(ConfigError::NoFiltersConfigured);
        }

        let mut filters = Vec::with_capacity(config.filters.len());
        for (position, name) in config.filters.iter().enumerate() {
            if config.filters[..position].contains(name) {
                return Err(ConfigError::DuplicateFilter(name.clone()));
            }
            let factory = self
                .factories
                .get(name)
                .ok_or_else(|| ConfigError::UnknownFilter(name.clone()))?;
            filters.push(factory(config)?);
        }

        Ok(filters)
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.factories.keys()).finish()
    }
}
