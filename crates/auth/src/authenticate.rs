//! Credential verification and token issuance.

use std::sync::Arc;

use chrono::Utc;

use mediscribe_core::{Tenant, User};

use crate::error::AuthError;
use crate::password;
use crate::store::CredentialStore;
use crate::token::TokenCodec;

/// Successful login/refresh result.
#[derive(Debug, Clone)]
pub struct LoginOutput {
    /// Signed session token.
    pub access_token: String,
    /// Token lifetime in minutes (same unit as the configured TTL).
    pub expires_in: i64,
}

/// Verifies email+password against the credential store for a resolved
/// tenant and issues session tokens.
#[derive(Clone)]
pub struct Authenticator {
    store: Arc<dyn CredentialStore>,
    codec: Arc<TokenCodec>,
}

impl Authenticator {
    pub fn new(store: Arc<dyn CredentialStore>, codec: Arc<TokenCodec>) -> Self {
        Self { store, codec }
    }

    /// Authenticate `email`+`password` within `tenant` and issue a token.
    ///
    /// `UserNotFound` and `InvalidCredentials` are distinct kinds for
    /// observability, but the transport layer surfaces them identically so
    /// callers cannot probe which emails are registered. The `last_login`
    /// update is best-effort: a store failure is logged and swallowed.
    pub async fn login(
        &self,
        tenant: &Tenant,
        email: &str,
        password: &str,
    ) -> Result<LoginOutput, AuthError> {
        // 1. Look up the user within the resolved tenant only.
        let user = self
            .store
            .user_by_email(tenant.id, email)
            .await
            .map_err(AuthError::Store)?
            .ok_or(AuthError::UserNotFound)?;

        // 2. Verify the password.
        if !password::verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        // 3. Deactivated accounts cannot start new sessions. Checked after
        //    password verification so the response does not reveal account
        //    state to a caller without the password.
        if !user.is_active {
            return Err(AuthError::Forbidden("user inactive".to_string()));
        }

        // 4. Record the login; losing this write must not fail the login.
        if let Err(e) = self.store.record_login(user.id, Utc::now()).await {
            tracing::warn!(user = %user.id, error = %e, "failed to record last_login");
        }

        // 5. Mint the token bound to the authenticated user's tenant.
        let access_token = self.codec.issue(user.id, tenant.id, None)?;

        tracing::info!(user = %user.id, tenant = %tenant.id, "login succeeded");

        Ok(LoginOutput {
            access_token,
            expires_in: self.codec.default_ttl_minutes(),
        })
    }

    /// Re-issue a fresh token for an already-authenticated identity.
    ///
    /// Claims are re-derived from the current authoritative records — never
    /// from the old token — so a role change or deactivation takes effect
    /// here. The tenant binding is re-checked even though the request
    /// middleware already did, so the invariant holds for any caller.
    pub async fn refresh(&self, user: &User, tenant: &Tenant) -> Result<LoginOutput, AuthError> {
        if user.tenant_id != tenant.id {
            return Err(AuthError::Unauthorized);
        }
        if !user.is_active {
            return Err(AuthError::Forbidden("user inactive".to_string()));
        }

        let access_token = self.codec.issue(user.id, tenant.id, None)?;

        Ok(LoginOutput {
            access_token,
            expires_in: self.codec.default_ttl_minutes(),
        })
    }
}
