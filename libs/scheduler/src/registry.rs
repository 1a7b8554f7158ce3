//! The pool registry collaborator.
//!
//! The chain asks the registry for the pool universe once per scheduling
//! call. Implementations backed by storage should load pools before the
//! call; [`PoolRegistry::find_pools`] is expected to answer from memory.

use std::sync::Arc;

use crate::context::Context;
use crate::error::RegistryError;
use crate::objects::PoolList;

/// Source of all currently known pools.
pub trait PoolRegistry: Send + Sync {
    fn find_pools(&self, ctx: &Context) -> Result<PoolList, RegistryError>;
}

impl<T: PoolRegistry + ?Sized> PoolRegistry for Arc<T> {
    fn find_pools(&self, ctx: &Context) -> Result<PoolList, RegistryError> {
        (**self).find_pools(ctx)
    }
}

/// An immutable in-memory snapshot of pools.
#[derive(Debug, Clone, Default)]
pub struct StaticPoolRegistry {
    pools: PoolList,
}

impl StaticPoolRegistry {
    pub fn new(pools: PoolList) -> Self {
        Self { pools }
    }

    pub fn pools(&self) -> &PoolList {
        &self.pools
    }
}

impl PoolRegistry for StaticPoolRegistry {
    fn find_pools(&self, _ctx: &Context) -> Result<PoolList, RegistryError> {
        Ok(self.pools.clone())
    }
}
