use tracing::debug;
use zonepool_id::PoolId;

use super::Filter;
use crate::config::SchedulerConfig;
use crate::context::{Context, FORCE_POOL_ROLE};
use crate::error::{ConfigError, FilterError};
use crate::objects::{PoolList, Zone, POOL_ID_ATTRIBUTE};

/// Honors a pool requested through the zone's `pool_id` attribute.
///
/// Only callers allowed to force a pool may use the hint. The result is the
/// requested pool if it is still a candidate, otherwise an empty list. Zones
/// without a hint pass through.
#[derive(Debug, Clone, Default)]
pub struct PoolIdAttributeFilter;

impl PoolIdAttributeFilter {
    pub const NAME: &'static str = "pool_id_attribute";

    pub fn from_config(_config: &SchedulerConfig) -> Result<Box<dyn Filter>, ConfigError> {
        Ok(Box::new(Self))
    }
}

impl Filter for PoolIdAttributeFilter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn apply(&self, ctx: &Context, pools: PoolList, zone: &Zone) -> Result<PoolList, FilterError> {
        let Some(hint) = zone.pool_hint() else {
            return Ok(pools);
        };

        if !ctx.can_force_pool() {
            return Err(FilterError::Forbidden {
                reason: format!(
                    "the '{POOL_ID_ATTRIBUTE}' attribute requires the '{FORCE_POOL_ROLE}' role"
                ),
            });
        }

        // An unparseable hint cannot name any candidate.
        let Ok(pool_id) = hint.parse::<PoolId>() else {
            debug!(hint, "Zone pool hint is not a valid pool ID");
            return Ok(PoolList::new());
        };

        debug!(pool_id = %pool_id, "Zone requests a specific pool");
        Ok(pools.only(&pool_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::{ids, pools};

    fn zone_with_hint(hint: &str) -> Zone {
        Zone::new("example.org.").with_attribute("pool_id", hint)
    }

    #[test]
    fn test_no_hint_passes_through() {
        let out = PoolIdAttributeFilter
            .apply(&Context::default(), pools(&["a", "b"]), &Zone::new("example.org."))
            .unwrap();
        assert_eq!(ids(&out), vec!["a", "b"]);
    }

    #[test]
    fn test_hint_selects_pool() {
        let out = PoolIdAttributeFilter
            .apply(&Context::admin(), pools(&["a", "b"]), &zone_with_hint("b"))
            .unwrap();
        assert_eq!(ids(&out), vec!["b"]);
    }

    #[test]
    fn test_hint_with_role() {
        let ctx = Context::new(None).with_role(FORCE_POOL_ROLE);
        let out = PoolIdAttributeFilter
            .apply(&ctx, pools(&["a", "b"]), &zone_with_hint("a"))
            .unwrap();
        assert_eq!(ids(&out), vec!["a"]);
    }

    #[test]
    fn test_hint_not_a_candidate() {
        let out = PoolIdAttributeFilter
            .apply(&Context::admin(), pools(&["a", "b"]), &zone_with_hint("c"))
            .unwrap();
        assert!(out.is_empty());

        let out = PoolIdAttributeFilter
            .apply(&Context::admin(), pools(&["a"]), &zone_with_hint("not a pool"))
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_hint_forbidden_for_tenant() {
        let err = PoolIdAttributeFilter
            .apply(&Context::new(None), pools(&["a", "b"]), &zone_with_hint("a"))
            .unwrap_err();
        assert!(matches!(err, FilterError::Forbidden { .. }));
    }
}
