use zonepool_id::PoolId;

use super::Filter;
use crate::config::SchedulerConfig;
use crate::context::Context;
use crate::error::{ConfigError, FilterError};
use crate::objects::{Pool, PoolList, Zone};

/// Always places zones on the default pool, ignoring earlier filters.
#[derive(Debug, Clone)]
pub struct DefaultPoolFilter {
    default_pool_id: PoolId,
}

impl DefaultPoolFilter {
    pub const NAME: &'static str = "default_pool";

    pub fn new(default_pool_id: PoolId) -> Self {
        Self { default_pool_id }
    }

    pub fn from_config(config: &SchedulerConfig) -> Result<Box<dyn Filter>, ConfigError> {
        let default_pool_id = config.require_default_pool_id(Self::NAME)?;
        Ok(Box::new(Self::new(default_pool_id.clone())))
    }
}

impl Filter for DefaultPoolFilter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn apply(
        &self,
        _ctx: &Context,
        _pools: PoolList,
        _zone: &Zone,
    ) -> Result<PoolList, FilterError> {
        Ok(PoolList::single(Pool::new(self.default_pool_id.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::{ids, pools};

    #[test]
    fn test_replaces_candidates() {
        let filter = DefaultPoolFilter::new("pool-42".parse().unwrap());
        let ctx = Context::default();
        let zone = Zone::new("example.org.");

        let out = filter.apply(&ctx, pools(&["a", "b"]), &zone).unwrap();
        assert_eq!(ids(&out), vec!["pool-42"]);

        let out = filter.apply(&ctx, PoolList::new(), &zone).unwrap();
        assert_eq!(ids(&out), vec!["pool-42"]);
    }

    #[test]
    fn test_requires_default_pool_id() {
        assert!(DefaultPoolFilter::from_config(&SchedulerConfig::default()).is_err());
    }
}
