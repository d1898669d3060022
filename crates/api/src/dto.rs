//! Request/response DTOs for the auth surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mediscribe_auth::LoginOutput;
use mediscribe_core::{Role, TenantId, User, UserId};

#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login/refresh response.
#[derive(Debug, Serialize)]
pub struct TokenOut {
    pub access_token: String,
    pub token_type: String,
    /// Token lifetime in minutes (the configured TTL unit).
    pub expires_in: i64,
}

impl From<LoginOutput> for TokenOut {
    fn from(out: LoginOutput) -> Self {
        Self {
            access_token: out.access_token,
            token_type: "bearer".to_string(),
            expires_in: out.expires_in,
        }
    }
}

/// Compact profile of the authenticated user. Deliberately does not
/// include the password hash field at all.
#[derive(Debug, Serialize)]
pub struct MeOut {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub tenant_id: TenantId,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<&User> for MeOut {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            tenant_id: user.tenant_id,
            is_active: user.is_active,
            last_login: user.last_login,
        }
    }
}
