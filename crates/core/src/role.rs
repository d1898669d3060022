//! Closed role enumeration for tenant-scoped RBAC.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Role of a user within its tenant.
///
/// This is a closed set: any other value coming out of storage is a
/// data-integrity violation, rejected at the read boundary rather than
/// carried around as a free string.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Tenant owner (full control, including tenant administration).
    Owner,
    /// Tenant administrator (user and configuration management).
    Admin,
    /// Operational staff (doctors and clinical personnel).
    Staff,
    /// Read-only access.
    Viewer,
}

impl Role {
    /// All roles, in privilege order. Useful for call sites that gate on
    /// "everything" and for exhaustiveness in tests.
    pub const ALL: [Role; 4] = [Role::Owner, Role::Admin, Role::Staff, Role::Viewer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Admin => "admin",
            Role::Staff => "staff",
            Role::Viewer => "viewer",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Role::Owner),
            "admin" => Ok(Role::Admin),
            "staff" => Ok(Role::Staff),
            "viewer" => Ok(Role::Viewer),
            other => Err(DomainError::invariant(format!("unknown role '{other}'"))),
        }
    }
}
