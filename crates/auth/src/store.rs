//! Credential store seam.
//!
//! The auth core never talks to a database directly: it is handed an
//! implementation of this trait at construction time (no module-level
//! singletons). `mediscribe-store` provides the Postgres and in-memory
//! implementations; the pool they wrap is initialized at process start and
//! torn down at shutdown.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use mediscribe_core::{Tenant, TenantId, User, UserId};

/// Lookup surface the auth core requires from persistence.
///
/// Every method is a single read (or a single benign write, for
/// [`record_login`](CredentialStore::record_login)); implementations must not
/// retry internally — a failed round-trip surfaces immediately as the
/// corresponding domain failure.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up a tenant by its unique code.
    async fn tenant_by_code(&self, code: &str) -> anyhow::Result<Option<Tenant>>;

    /// Look up a user by email within one tenant. Email is only unique
    /// per-tenant, so the tenant id is part of the key.
    async fn user_by_email(&self, tenant_id: TenantId, email: &str)
    -> anyhow::Result<Option<User>>;

    /// Look up a user by id (tenant binding is checked by the caller
    /// against the token and the resolved tenant).
    async fn user_by_id(&self, id: UserId) -> anyhow::Result<Option<User>>;

    /// Record a successful login (`last_login := at`). Last-writer-wins;
    /// callers treat failures as non-fatal.
    async fn record_login(&self, id: UserId, at: DateTime<Utc>) -> anyhow::Result<()>;
}
