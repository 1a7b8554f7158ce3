use super::Filter;
use crate::config::SchedulerConfig;
use crate::context::Context;
use crate::error::{ConfigError, FilterError};
use crate::objects::{Pool, PoolList, Zone};

/// Keeps pools whose attributes match every zone attribute.
///
/// A pool matches when it has each of the zone's attribute keys with an
/// equal value. The reserved `pool_id` key is left to
/// [`PoolIdAttributeFilter`](super::PoolIdAttributeFilter).
#[derive(Debug, Clone, Default)]
pub struct AttributeFilter;

impl AttributeFilter {
    pub const NAME: &'static str = "attribute";

    pub fn from_config(_config: &SchedulerConfig) -> Result<Box<dyn Filter>, ConfigError> {
        Ok(Box::new(Self))
    }

    fn matches(pool: &Pool, zone: &Zone) -> bool {
        zone.matching_attributes()
            .all(|(key, value)| pool.attributes.get(key) == Some(value))
    }
}

impl Filter for AttributeFilter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn apply(&self, _ctx: &Context, pools: PoolList, zone: &Zone) -> Result<PoolList, FilterError> {
        Ok(pools.filtered(|pool| Self::matches(pool, zone)))
    }
}
