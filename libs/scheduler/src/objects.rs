//! Placement data model: pools, pool lists and zones.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use zonepool_id::{PoolId, TenantId, ZoneId};

use crate::error::PoolListError;

/// Zone attribute key carrying a requested pool.
pub const POOL_ID_ATTRIBUTE: &str = "pool_id";

// =============================================================================
// Pool
// =============================================================================

/// A hosting target capable of serving zones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    id: PoolId,

    /// Human-readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Key/value attributes matched against zone attributes.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    /// Capability tags (e.g. `dnssec`).
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub capabilities: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Pool {
    /// Create a bare pool carrying only its ID.
    ///
    /// Callers hydrate the full record by ID later.
    pub fn new(id: PoolId) -> Self {
        Self {
            id,
            name: None,
            description: None,
            attributes: BTreeMap::new(),
            capabilities: BTreeSet::new(),
            region: None,
        }
    }

    /// The pool ID. Fixed for the lifetime of the pool.
    pub fn id(&self) -> &PoolId {
        &self.id
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.insert(capability.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Returns true if the pool carries every listed capability.
    pub fn has_capabilities<'a, I>(&self, required: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        required.into_iter().all(|c| self.capabilities.contains(c))
    }
}

// =============================================================================
// PoolList
// =============================================================================

/// An ordered list of pools with unique IDs.
///
/// Order is preserved but carries no meaning across filters. Every way of
/// building a list rejects duplicate IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Pool>", into = "Vec<Pool>")]
pub struct PoolList {
    pools: Vec<Pool>,
}

impl PoolList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a list holding exactly one pool.
    pub fn single(pool: Pool) -> Self {
        Self { pools: vec![pool] }
    }

    /// Build a list, rejecting duplicate IDs.
    pub fn from_pools<I>(pools: I) -> Result<Self, PoolListError>
    where
        I: IntoIterator<Item = Pool>,
    {
        let mut list = Self::new();
        for pool in pools {
            list.push(pool)?;
        }
        Ok(list)
    }

    /// Append a pool, rejecting duplicate IDs.
    pub fn push(&mut self, pool: Pool) -> Result<(), PoolListError> {
        if self.contains(pool.id()) {
            return Err(PoolListError::DuplicatePool(pool.id().clone()));
        }
        self.pools.push(pool);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pool> {
        self.pools.iter()
    }

    pub fn first(&self) -> Option<&Pool> {
        self.pools.first()
    }

    pub fn get(&self, id: &PoolId) -> Option<&Pool> {
        self.pools.iter().find(|p| p.id() == id)
    }

    pub fn contains(&self, id: &PoolId) -> bool {
        self.get(id).is_some()
    }

    /// IDs in list order.
    pub fn ids(&self) -> Vec<&PoolId> {
        self.pools.iter().map(Pool::id).collect()
    }

    /// Keep the pools matching `predicate`, preserving order.
    #[must_use]
    pub fn filtered<F>(self, mut predicate: F) -> Self
    where
        F: FnMut(&Pool) -> bool,
    {
        Self {
            pools: self.pools.into_iter().filter(|p| predicate(p)).collect(),
        }
    }

    /// Reduce the list to the pool with `id`, or to an empty list.
    #[must_use]
    pub fn only(self, id: &PoolId) -> Self {
        self.pools
            .into_iter()
            .find(|p| p.id() == id)
            .map(Self::single)
            .unwrap_or_default()
    }

    pub fn into_vec(self) -> Vec<Pool> {
        self.pools
    }
}

impl TryFrom<Vec<Pool>> for PoolList {
    type Error = PoolListError;

    fn try_from(pools: Vec<Pool>) -> Result<Self, Self::Error> {
        Self::from_pools(pools)
    }
}

impl From<PoolList> for Vec<Pool> {
    fn from(list: PoolList) -> Self {
        list.pools
    }
}

impl IntoIterator for PoolList {
    type Item = Pool;
    type IntoIter = std::vec::IntoIter<Pool>;

    fn into_iter(self) -> Self::IntoIter {
        self.pools.into_iter()
    }
}

impl<'a> IntoIterator for &'a PoolList {
    type Item = &'a Pool;
    type IntoIter = std::slice::Iter<'a, Pool>;

    fn into_iter(self) -> Self::IntoIter {
        self.pools.iter()
    }
}

// =============================================================================
// Zone
// =============================================================================

/// The DNS zone being placed. Read-only during a scheduling pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,

    /// Fully-qualified zone name, e.g. `example.org.`.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<TenantId>,

    /// Placement attributes. `pool_id` is reserved for a requested pool.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    /// Capabilities the zone needs from its pool.
    #[serde(default)]
    pub capabilities: BTreeSet<String>,
}

impl Zone {
    /// Create a zone with a freshly generated ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ZoneId::new(),
            name: name.into(),
            tenant_id: None,
            attributes: BTreeMap::new(),
            capabilities: BTreeSet::new(),
        }
    }

    pub fn with_tenant(mut self, tenant_id: TenantId) -> Self {
        self.tenant_id = Some(tenant_id);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.insert(capability.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw `pool_id` attribute, if the zone requests a pool.
    pub fn pool_hint(&self) -> Option<&str> {
        self.attributes.get(POOL_ID_ATTRIBUTE).map(String::as_str)
    }

    /// Placement attributes other than the reserved pool hint.
    pub fn matching_attributes(&self) -> impl Iterator<Item = (&String, &String)> {
        self.attributes
            .iter()
            .filter(|(k, _)| k.as_str() != POOL_ID_ATTRIBUTE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(id: &str) -> Pool {
        Pool::new(id.parse().unwrap())
    }

    #[test]
    fn test_pool_list_rejects_duplicates() {
        let result = PoolList::from_pools(vec![pool("a"), pool("b"), pool("a")]);
        assert_eq!(
            result.unwrap_err(),
            PoolListError::DuplicatePool("a".parse().unwrap())
        );
    }

    #[test]
    fn test_pool_list_push_rejects_duplicate() {
        let mut list = PoolList::single(pool("a"));
        assert!(list.push(pool("b")).is_ok());
        assert!(list.push(pool("a")).is_err());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_filtered_preserves_order() {
        let list = PoolList::from_pools(vec![pool("a"), pool("b"), pool("c")]).unwrap();
        let kept = list.filtered(|p| p.id().as_str() != "b");
        let ids: Vec<_> = kept.ids().into_iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_only_missing_pool_is_empty() {
        let list = PoolList::from_pools(vec![pool("a"), pool("b")]).unwrap();
        assert!(list.clone().only(&"z".parse().unwrap()).is_empty());
        assert_eq!(list.only(&"b".parse().unwrap()).len(), 1);
    }

    #[test]
    fn test_deserialize_rejects_duplicates() {
        let json = r#"[{"id": "a"}, {"id": "a"}]"#;
        let result: Result<PoolList, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_pool_serializes_sparse() {
        let json = serde_json::to_value(pool("pool-42")).unwrap();
        assert_eq!(json, serde_json::json!({"id": "pool-42"}));
    }

    #[test]
    fn test_zone_pool_hint_excluded_from_matching() {
        let zone = Zone::new("example.org.")
            .with_attribute("pool_id", "pool-1")
            .with_attribute("tier", "gold");

        assert_eq!(zone.pool_hint(), Some("pool-1"));
        let keys: Vec<_> = zone.matching_attributes().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["tier"]);
    }

    #[test]
    fn test_zone_tenant_serialized_when_set() {
        let zone = Zone::new("example.org.");
        let json = serde_json::to_value(&zone).unwrap();
        assert!(json.get("tenant_id").is_none());

        let zone = zone.with_tenant("tenant-1".parse().unwrap());
        let json = serde_json::to_value(&zone).unwrap();
        assert_eq!(json["tenant_id"], "tenant-1");

        let back: Zone = serde_json::from_value(json).unwrap();
        assert_eq!(back, zone);
    }
}
