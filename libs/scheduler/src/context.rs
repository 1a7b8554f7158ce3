//! Request-scoped caller context.

use std::collections::BTreeSet;

use zonepool_id::{RequestId, TenantId};

/// Role that allows a caller to place a zone on a pool of their choosing.
pub const FORCE_POOL_ROLE: &str = "zone_create_forced_pool";

/// Caller identity for one scheduling call.
///
/// Filters read it but never mutate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    request_id: RequestId,
    tenant_id: Option<TenantId>,
    roles: BTreeSet<String>,
    is_admin: bool,
}

impl Context {
    /// Context for a regular tenant.
    pub fn new(tenant_id: Option<TenantId>) -> Self {
        Self {
            request_id: RequestId::new(),
            tenant_id,
            roles: BTreeSet::new(),
            is_admin: false,
        }
    }

    /// Context for an administrative caller.
    pub fn admin() -> Self {
        Self {
            is_admin: true,
            ..Self::new(None)
        }
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = request_id;
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    pub fn tenant_id(&self) -> Option<&TenantId> {
        self.tenant_id.as_ref()
    }

    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// Whether the caller may pin a zone to a specific pool.
    pub fn can_force_pool(&self) -> bool {
        self.is_admin || self.has_role(FORCE_POOL_ROLE)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_force_pool_permission() {
        assert!(!Context::new(None).can_force_pool());
        assert!(Context::admin().can_force_pool());
        assert!(Context::new(None)
            .with_role(FORCE_POOL_ROLE)
            .can_force_pool());
    }

    #[test]
    fn test_request_id_and_tenant() {
        let request_id: RequestId = "req-1".parse().unwrap();
        let tenant_id: TenantId = "tenant-1".parse().unwrap();
        let ctx = Context::new(Some(tenant_id.clone())).with_request_id(request_id.clone());

        assert_eq!(ctx.request_id(), &request_id);
        assert_eq!(ctx.tenant_id(), Some(&tenant_id));
        assert!(!ctx.is_admin());
        assert!(ctx.roles().is_empty());
    }
}
