use sha2::{Digest, Sha256};

use super::Filter;
use crate::config::SchedulerConfig;
use crate::context::Context;
use crate::error::{ConfigError, FilterError};
use crate::objects::{PoolList, Zone};

/// Spreads zones across the remaining candidates by hashing the zone name.
///
/// The same zone name and candidate list always select the same pool.
#[derive(Debug, Clone, Default)]
pub struct ZoneHashFilter;

impl ZoneHashFilter {
    pub const NAME: &'static str = "zone_hash";

    pub fn from_config(_config: &SchedulerConfig) -> Result<Box<dyn Filter>, ConfigError> {
        Ok(Box::new(Self))
    }

    fn index(zone_name: &str, len: usize) -> usize {
        let mut hasher = Sha256::new();
        hasher.update(zone_name.to_ascii_lowercase().as_bytes());
        let digest = hasher.finalize();

        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&digest[..8]);
        (u64::from_be_bytes(prefix) % len as u64) as usize
    }
}

impl Filter for ZoneHashFilter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn apply(&self, _ctx: &Context, pools: PoolList, zone: &Zone) -> Result<PoolList, FilterError> {
        if pools.len() <= 1 {
            return Ok(pools);
        }

        let index = Self::index(zone.name(), pools.len());
        let chosen = pools
            .into_iter()
            .nth(index)
            .ok_or_else(|| FilterError::Invariant(format!("hash index {index} out of range")))?;
        Ok(PoolList::single(chosen))
    }
}
