//! Tenant resolution from the per-request tenant code.

use std::sync::Arc;

use mediscribe_core::Tenant;

use crate::error::AuthError;
use crate::store::CredentialStore;

/// Maps an inbound tenant code (extracted by the transport layer from the
/// `X-Tenant-Code` header) to an active tenant record.
#[derive(Clone)]
pub struct TenantResolver {
    store: Arc<dyn CredentialStore>,
}

impl TenantResolver {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Resolve a tenant code to an active tenant.
    ///
    /// A missing or blank code is a [`AuthError::TenantNotFound`] — never a
    /// crash; an existing but deactivated tenant is
    /// [`AuthError::TenantInactive`].
    pub async fn resolve(&self, code: Option<&str>) -> Result<Tenant, AuthError> {
        let code = code
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(AuthError::TenantNotFound)?;

        let tenant = self
            .store
            .tenant_by_code(code)
            .await
            .map_err(AuthError::Store)?
            .ok_or(AuthError::TenantNotFound)?;

        if !tenant.is_active {
            return Err(AuthError::TenantInactive);
        }

        Ok(tenant)
    }
}
