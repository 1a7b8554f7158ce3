use tracing::warn;
use zonepool_id::PoolId;

use super::Filter;
use crate::config::SchedulerConfig;
use crate::context::Context;
use crate::error::{ConfigError, FilterError};
use crate::objects::{Pool, PoolList, Zone};

/// Substitutes the default pool when no candidates are left.
///
/// Non-empty input passes through untouched. Intended to run last, so the
/// earlier filters decide whenever at least one pool survives them.
#[derive(Debug, Clone)]
pub struct FallbackFilter {
    default_pool_id: PoolId,
}

impl FallbackFilter {
    pub const NAME: &'static str = "fallback";

    pub fn new(default_pool_id: PoolId) -> Self {
        Self { default_pool_id }
    }

    pub fn from_config(config: &SchedulerConfig) -> Result<Box<dyn Filter>, ConfigError> {
        let default_pool_id = config.require_default_pool_id(Self::NAME)?;
        Ok(Box::new(Self::new(default_pool_id.clone())))
    }
}

impl Filter for FallbackFilter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn apply(&self, _ctx: &Context, pools: PoolList, zone: &Zone) -> Result<PoolList, FilterError> {
        if !pools.is_empty() {
            return Ok(pools);
        }

        warn!(
            zone = %zone.name(),
            default_pool_id = %self.default_pool_id,
            "No candidate pools left, falling back to default pool"
        );
        Ok(PoolList::single(Pool::new(self.default_pool_id.clone())))
    }
}
