//! Authentication/authorization error taxonomy.

use thiserror::Error;

/// Result type used across the auth core.
pub type AuthResult<T> = Result<T, AuthError>;

/// Typed failure kinds of the auth core.
///
/// All failures are terminal for the current request — nothing here is
/// retried internally. The transport layer owns the mapping to status codes
/// and client-facing messages; in particular `UserNotFound` and
/// `InvalidCredentials` must be indistinguishable on the wire, and
/// `Unauthorized` must never say which tenant-binding check failed.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No tenant has the requested code (or no code was supplied).
    #[error("tenant not found")]
    TenantNotFound,

    /// The tenant exists but has been deactivated.
    #[error("tenant is inactive")]
    TenantInactive,

    /// No user with that email within the tenant. Logged distinctly from
    /// `InvalidCredentials`; surfaced identically.
    #[error("user not found")]
    UserNotFound,

    /// Password verification failed.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Signature verified but the token is past its expiry. Routine.
    #[error("token has expired")]
    TokenExpired,

    /// Signature mismatch, malformed payload, or missing claims. May
    /// indicate tampering; logged at elevated level by the boundary.
    #[error("invalid token")]
    TokenInvalid,

    /// Post-decode rejection: unknown subject or tenant-binding mismatch.
    #[error("unauthorized")]
    Unauthorized,

    /// Inactive user, or role not in the operation's allowed set. The
    /// payload is for logs, not for the client response.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Credential store round-trip failed.
    #[error("credential store failure")]
    Store(#[source] anyhow::Error),

    /// Cryptographic primitive failed (hashing, signing).
    #[error("cryptography error: {0}")]
    Crypto(String),
}
