//! In-memory credential store for tests and local development.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use mediscribe_auth::CredentialStore;
use mediscribe_core::{Tenant, TenantId, User, UserId};

/// Map-backed store. Reads clone; the only write is `record_login`,
/// last-writer-wins like its Postgres counterpart.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    tenants: RwLock<HashMap<TenantId, Tenant>>,
    users: RwLock<HashMap<UserId, User>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_tenant(&self, tenant: Tenant) {
        self.tenants.write().unwrap().insert(tenant.id, tenant);
    }

    pub fn insert_user(&self, user: User) {
        self.users.write().unwrap().insert(user.id, user);
    }

    pub fn get_user(&self, id: UserId) -> Option<User> {
        self.users.read().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn tenant_by_code(&self, code: &str) -> anyhow::Result<Option<Tenant>> {
        Ok(self
            .tenants
            .read()
            .unwrap()
            .values()
            .find(|t| t.code == code)
            .cloned())
    }

    async fn user_by_email(
        &self,
        tenant_id: TenantId,
        email: &str,
    ) -> anyhow::Result<Option<User>> {
        Ok(self
            .users
            .read()
            .unwrap()
            .values()
            .find(|u| u.tenant_id == tenant_id && u.email == email)
            .cloned())
    }

    async fn user_by_id(&self, id: UserId) -> anyhow::Result<Option<User>> {
        Ok(self.users.read().unwrap().get(&id).cloned())
    }

    async fn record_login(&self, id: UserId, at: DateTime<Utc>) -> anyhow::Result<()> {
        if let Some(user) = self.users.write().unwrap().get_mut(&id) {
            user.last_login = Some(at);
        }
        Ok(())
    }
}
