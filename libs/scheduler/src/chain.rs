//! The filter chain.
//!
//! The chain is responsible for:
//! - Loading the pool universe from the registry once per call
//! - Threading the candidate list through every filter in configured order
//! - Narrowing the result to a single pool for zone creation
//!
//! Every filter runs even when an earlier one left no candidates, so a
//! trailing `fallback` can observe the empty list.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, instrument};
use zonepool_id::PoolId;

use crate::config::SchedulerConfig;
use crate::context::Context;
use crate::error::{ConfigError, SchedulerResult, SchedulingError};
use crate::filters::{Filter, FilterRegistry};
use crate::objects::{PoolList, Zone};
use crate::registry::PoolRegistry;

/// An ordered, immutable sequence of filters over a pool registry.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
    pools: Arc<dyn PoolRegistry>,
}

impl FilterChain {
    /// Create a chain from already-built filters.
    pub fn new(
        filters: Vec<Box<dyn Filter>>,
        pools: Arc<dyn PoolRegistry>,
    ) -> Result<Self, ConfigError> {
        if filters.is_empty() {
            return Err(ConfigError::NoFiltersConfigured);
        }
        Ok(Self { filters, pools })
    }

    /// Build the configured filters through `registry`.
    pub fn from_config(
        config: &SchedulerConfig,
        registry: &FilterRegistry,
        pools: Arc<dyn PoolRegistry>,
    ) -> Result<Self, ConfigError> {
        let filters = registry.build(config)?;
        let chain = Self::new(filters, pools)?;
        info!(filters = ?chain.filter_names(), "Scheduler filter chain built");
        Ok(chain)
    }

    /// Filter names in the order they run.
    pub fn filter_names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Compute the pools that may host `zone`.
    #[instrument(skip_all, fields(zone = %zone.name(), request_id = %ctx.request_id()))]
    pub fn schedule(&self, ctx: &Context, zone: &Zone) -> SchedulerResult<PoolList> {
        let pools = self.pools.find_pools(ctx)?;
        debug!(pool_count = pools.len(), "Loaded candidate pools");

        let pools = self.apply(ctx, pools, zone)?;
        info!(pools = ?pools.ids(), "Scheduling complete");
        Ok(pools)
    }

    /// Thread `pools` through every filter without consulting the registry.
    pub fn apply(
        &self,
        ctx: &Context,
        mut pools: PoolList,
        zone: &Zone,
    ) -> SchedulerResult<PoolList> {
        for filter in &self.filters {
            let before = pools.len();
            pools = filter
                .apply(ctx, pools, zone)
                .map_err(|source| SchedulingError::Filter {
                    filter: filter.name(),
                    source,
                })?;
            debug!(
                filter = filter.name(),
                before,
                after = pools.len(),
                "Applied scheduling filter"
            );
        }
        Ok(pools)
    }

    /// Select the single pool a new zone is created on.
    pub fn schedule_zone(&self, ctx: &Context, zone: &Zone) -> SchedulerResult<PoolId> {
        let pools = self.schedule(ctx, zone)?;
        if pools.len() > 1 {
            return Err(SchedulingError::MultiplePools { count: pools.len() });
        }
        pools
            .into_iter()
            .next()
            .map(|pool| pool.id().clone())
            .ok_or(SchedulingError::NoValidPool)
    }
}

impl fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("filters", &self.filters)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FilterError, RegistryError};
    use crate::filters::test_support::{ids, pool, pools};
    use crate::filters::{CapabilityFilter, FallbackFilter};
    use crate::registry::StaticPoolRegistry;

    #[derive(Debug)]
    struct Failing;

    impl Filter for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn apply(&self, _: &Context, _: PoolList, _: &Zone) -> Result<PoolList, FilterError> {
            Err(FilterError::Invariant("boom".to_string()))
        }
    }

    #[derive(Debug)]
    struct Unavailable;

    impl PoolRegistry for Unavailable {
        fn find_pools(&self, _: &Context) -> Result<PoolList, RegistryError> {
            Err(RegistryError::Unavailable("storage offline".to_string()))
        }
    }

    fn registry(ids: &[&str]) -> Arc<dyn PoolRegistry> {
        Arc::new(StaticPoolRegistry::new(pools(ids)))
    }

    fn fallback() -> Box<dyn Filter> {
        Box::new(FallbackFilter::new("pool-42".parse().unwrap()))
    }

    #[test]
    fn test_empty_chain_rejected() {
        let err = FilterChain::new(vec![], registry(&["a"])).unwrap_err();
        assert!(matches!(err, ConfigError::NoFiltersConfigured));
    }

    #[test]
    fn test_no_short_circuit_on_empty() {
        let filters: Vec<Box<dyn Filter>> =
            vec![Box::new(CapabilityFilter::new(["dnssec"])), fallback()];
        let chain = FilterChain::new(filters, registry(&["a", "b"])).unwrap();

        let out = chain
            .schedule(&Context::default(), &Zone::new("example.org."))
            .unwrap();
        assert_eq!(ids(&out), vec!["pool-42"]);
    }

    #[test]
    fn test_filter_error_names_filter() {
        let filters: Vec<Box<dyn Filter>> = vec![Box::new(Failing), fallback()];
        let chain = FilterChain::new(filters, registry(&["a"])).unwrap();
        let err = chain
            .schedule(&Context::default(), &Zone::new("example.org."))
            .unwrap_err();
        assert_eq!(
            err,
            SchedulingError::Filter {
                filter: "failing",
                source: FilterError::Invariant("boom".to_string()),
            }
        );
    }

    #[test]
    fn test_registry_error_surfaces() {
        let chain = FilterChain::new(vec![fallback()], Arc::new(Unavailable)).unwrap();
        let err = chain
            .schedule(&Context::default(), &Zone::new("example.org."))
            .unwrap_err();
        assert!(matches!(err, SchedulingError::Registry(_)));
    }

    #[test]
    fn test_schedule_zone_single() {
        let chain = FilterChain::new(vec![fallback()], registry(&[])).unwrap();
        let id = chain
            .schedule_zone(&Context::default(), &Zone::new("example.org."))
            .unwrap();
        assert_eq!(id.as_str(), "pool-42");
    }

    #[test]
    fn test_schedule_zone_multiple() {
        let chain = FilterChain::new(vec![fallback()], registry(&["a", "b"])).unwrap();
        let err = chain
            .schedule_zone(&Context::default(), &Zone::new("example.org."))
            .unwrap_err();
        assert_eq!(err, SchedulingError::MultiplePools { count: 2 });
        assert!(err.is_no_placement());
    }

    #[test]
    fn test_schedule_zone_none() {
        let filters: Vec<Box<dyn Filter>> = vec![Box::new(CapabilityFilter::new(["dnssec"]))];
        let chain = FilterChain::new(filters, registry(&["a"])).unwrap();
        let err = chain
            .schedule_zone(&Context::default(), &Zone::new("example.org."))
            .unwrap_err();
        assert_eq!(err, SchedulingError::NoValidPool);
    }

    #[test]
    fn test_apply_uses_given_pools() {
        let chain = FilterChain::new(vec![fallback()], registry(&["a"])).unwrap();
        let input = PoolList::single(pool("z"));
        let out = chain
            .apply(&Context::default(), input, &Zone::new("example.org."))
            .unwrap();
        assert_eq!(ids(&out), vec!["z"]);
    }

    #[test]
    fn test_chain_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FilterChain>();
    }
}
