//! Per-request context carried in axum extensions.

use mediscribe_core::{Tenant, TenantId, User};

/// Tenant resolved from the `X-Tenant-Code` header.
///
/// This is immutable and must be present for all tenant-scoped routes.
#[derive(Debug, Clone)]
pub struct TenantContext {
    tenant: Tenant,
}

impl TenantContext {
    pub fn new(tenant: Tenant) -> Self {
        Self { tenant }
    }

    pub fn tenant(&self) -> &Tenant {
        &self.tenant
    }

    pub fn tenant_id(&self) -> TenantId {
        self.tenant.id
    }
}

/// Authenticated identity resolved from the bearer token.
///
/// Exists only for the duration of request processing — never cached
/// across requests.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    user: User,
}

impl CurrentUser {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &User {
        &self.user
    }
}
