//! Per-request identity resolution from a bearer token.

use std::sync::Arc;

use mediscribe_core::{Tenant, User};

use crate::error::AuthError;
use crate::store::CredentialStore;
use crate::token::TokenCodec;

/// Reconstructs the authenticated user from a bearer token and the tenant
/// resolved independently from the request's routing header.
#[derive(Clone)]
pub struct IdentityResolver {
    store: Arc<dyn CredentialStore>,
    codec: Arc<TokenCodec>,
}

impl IdentityResolver {
    pub fn new(store: Arc<dyn CredentialStore>, codec: Arc<TokenCodec>) -> Self {
        Self { store, codec }
    }

    /// Resolve the current user, or reject the request.
    ///
    /// The tenant-binding check is the core defense against token replay
    /// across tenants: the token's tenant claim, the user's stored tenant,
    /// and the tenant resolved from the request header must all agree. Any
    /// single mismatch rejects with an opaque [`AuthError::Unauthorized`]
    /// that does not reveal which equality failed.
    pub async fn resolve(
        &self,
        bearer: Option<&str>,
        tenant: &Tenant,
    ) -> Result<User, AuthError> {
        let token = bearer
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::Unauthorized)?;

        // Signature + expiry; failure kinds propagate for observability and
        // both map to 401 at the boundary.
        let claims = self.codec.decode(token)?;

        let user = self
            .store
            .user_by_id(claims.sub)
            .await
            .map_err(AuthError::Store)?
            .ok_or(AuthError::Unauthorized)?;

        // Tenant binding: all three pairwise equalities must hold.
        let bound = claims.tenant_id == user.tenant_id
            && claims.tenant_id == tenant.id
            && user.tenant_id == tenant.id;
        if !bound {
            tracing::warn!(
                user = %user.id,
                "tenant binding mismatch on bearer token"
            );
            return Err(AuthError::Unauthorized);
        }

        if !user.is_active {
            return Err(AuthError::Forbidden("user inactive".to_string()));
        }

        Ok(user)
    }
}
