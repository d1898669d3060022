//! Postgres-backed credential store.
//!
//! ## Tenant isolation
//!
//! The email lookup always includes `tenant_id` in the WHERE clause —
//! email is only unique per tenant, and an unscoped lookup would be a
//! cross-tenant leak waiting to happen.
//!
//! ## Pool lifecycle
//!
//! The pool is created once at process start via [`connect`] and shared;
//! call [`PgCredentialStore::close`] on shutdown to drain connections.

use core::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool, Row};

use mediscribe_auth::CredentialStore;
use mediscribe_core::{Role, Tenant, TenantId, User, UserId};

/// Create the shared connection pool.
pub async fn connect(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    tracing::info!("connected to postgres");
    Ok(pool)
}

/// Credential store on a shared Postgres pool.
#[derive(Debug, Clone)]
pub struct PgCredentialStore {
    pool: Arc<PgPool>,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Drain the pool on shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn tenant_by_code(&self, code: &str) -> anyhow::Result<Option<Tenant>> {
        let row: Option<TenantRow> = sqlx::query_as(
            r#"
            SELECT id, code, name, is_active, created_at, updated_at
            FROM tenant
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(row.map(Tenant::from))
    }

    async fn user_by_email(
        &self,
        tenant_id: TenantId,
        email: &str,
    ) -> anyhow::Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, tenant_id, email, full_name, role, password_hash,
                   is_active, last_login, created_at, updated_at
            FROM app_user
            WHERE tenant_id = $1 AND email = $2
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(email)
        .fetch_optional(&*self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn user_by_id(&self, id: UserId) -> anyhow::Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, tenant_id, email, full_name, role, password_hash,
                   is_active, last_login, created_at, updated_at
            FROM app_user
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&*self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn record_login(&self, id: UserId, at: DateTime<Utc>) -> anyhow::Result<()> {
        sqlx::query("UPDATE app_user SET last_login = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(at)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }
}

#[derive(Debug)]
struct TenantRow {
    id: uuid::Uuid,
    code: String,
    name: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, sqlx::postgres::PgRow> for TenantRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(TenantRow {
            id: row.try_get("id")?,
            code: row.try_get("code")?,
            name: row.try_get("name")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl From<TenantRow> for Tenant {
    fn from(row: TenantRow) -> Self {
        Tenant {
            id: TenantId::from_uuid(row.id),
            code: row.code,
            name: row.name,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug)]
struct UserRow {
    id: uuid::Uuid,
    tenant_id: uuid::Uuid,
    email: String,
    full_name: String,
    role: String,
    password_hash: String,
    is_active: bool,
    last_login: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, sqlx::postgres::PgRow> for UserRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(UserRow {
            id: row.try_get("id")?,
            tenant_id: row.try_get("tenant_id")?,
            email: row.try_get("email")?,
            full_name: row.try_get("full_name")?,
            role: row.try_get("role")?,
            password_hash: row.try_get("password_hash")?,
            is_active: row.try_get("is_active")?,
            last_login: row.try_get("last_login")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl TryFrom<UserRow> for User {
    type Error = anyhow::Error;

    /// Row → domain conversion. The role string is validated here, at the
    /// read boundary: an out-of-vocabulary value is a data-integrity
    /// violation, not a value to carry forward.
    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = Role::from_str(&row.role)
            .map_err(|e| anyhow::anyhow!("user {}: {e}", row.id))?;
        Ok(User {
            id: UserId::from_uuid(row.id),
            tenant_id: TenantId::from_uuid(row.tenant_id),
            email: row.email,
            full_name: row.full_name,
            role,
            password_hash: row.password_hash,
            is_active: row.is_active,
            last_login: row.last_login,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
