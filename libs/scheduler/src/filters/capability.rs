use std::collections::BTreeSet;

use tracing::debug;

use super::Filter;
use crate::config::SchedulerConfig;
use crate::context::Context;
use crate::error::{ConfigError, FilterError};
use crate::objects::{PoolList, Zone};

/// Keeps pools that carry every required capability.
///
/// Required capabilities are the configured `capability.requires` set plus
/// whatever the zone itself asks for.
#[derive(Debug, Clone, Default)]
pub struct CapabilityFilter {
    requires: BTreeSet<String>,
}

impl CapabilityFilter {
    pub const NAME: &'static str = "capability";

    pub fn new<I, S>(requires: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            requires: requires.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &SchedulerConfig) -> Result<Box<dyn Filter>, ConfigError> {
        Ok(Box::new(Self::new(config.capability.requires.iter().cloned())))
    }
}

impl Filter for CapabilityFilter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn apply(&self, _ctx: &Context, pools: PoolList, zone: &Zone) -> Result<PoolList, FilterError> {
        let required: BTreeSet<&String> = self.requires.iter().chain(&zone.capabilities).collect();
        if required.is_empty() {
            return Ok(pools);
        }

        debug!(required = ?required, "Filtering pools by capability");
        Ok(pools.filtered(|pool| pool.has_capabilities(required.iter().copied())))
    }
}
