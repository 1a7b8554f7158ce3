use zonepool_id::PoolId;

use super::Filter;
use crate::config::SchedulerConfig;
use crate::context::Context;
use crate::error::{ConfigError, FilterError};
use crate::objects::{PoolList, Zone};

/// Breaks ties in favour of the default pool.
///
/// When more than one candidate is left and the default pool is among them,
/// only the default pool is kept. Otherwise the input passes through.
#[derive(Debug, Clone)]
pub struct InDoubtDefaultPoolFilter {
    default_pool_id: PoolId,
}

impl InDoubtDefaultPoolFilter {
    pub const NAME: &'static str = "in_doubt_default_pool";

    pub fn new(default_pool_id: PoolId) -> Self {
        Self { default_pool_id }
    }

    pub fn from_config(config: &SchedulerConfig) -> Result<Box<dyn Filter>, ConfigError> {
        let default_pool_id = config.require_default_pool_id(Self::NAME)?;
        Ok(Box::new(Self::new(default_pool_id.clone())))
    }
}

impl Filter for InDoubtDefaultPoolFilter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn apply(
        &self,
        _ctx: &Context,
        pools: PoolList,
        _zone: &Zone,
    ) -> Result<PoolList, FilterError> {
        if pools.len() > 1 && pools.contains(&self.default_pool_id) {
            return Ok(pools.only(&self.default_pool_id));
        }
        Ok(pools)
    }
}
