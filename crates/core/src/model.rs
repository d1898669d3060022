//! Tenant and user records.
//!
//! These are the authoritative shapes the credential store hands back to the
//! auth core. They are plain data: lifecycle (creation, deactivation) is
//! driven by administrative workflows outside this workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{TenantId, UserId};
use crate::role::Role;

/// An isolated customer organization (a clinic).
///
/// # Invariants
/// - `code` is globally unique and is the value clients send in the
///   tenant-resolution header.
/// - An inactive tenant must cause every operation to fail; tenants are
///   deactivated, never hard-deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    /// Human-chosen unique slug, e.g. `clinic-1`.
    pub code: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user (doctor or staff member) belonging to exactly one tenant.
///
/// # Invariants
/// - `(tenant_id, email)` is unique; `email` alone is not.
/// - `tenant_id` is immutable for the lifetime of the user.
/// - `password_hash` is an opaque PHC string and must never be serialized
///   toward a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub tenant_id: TenantId,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    /// Updated (best-effort) on every successful login.
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
