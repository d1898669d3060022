//! `mediscribe-auth` — tenant-scoped authentication/authorization core.
//!
//! This crate is intentionally decoupled from HTTP and storage. The transport
//! layer hands it raw header values; storage is reached only through the
//! [`CredentialStore`] seam, injected at construction time. Every failure is a
//! typed [`AuthError`] value — the transport boundary performs the single
//! translation to a status code.

pub mod authenticate;
pub mod config;
pub mod error;
pub mod gate;
pub mod identity;
pub mod password;
pub mod store;
pub mod tenant;
pub mod token;

pub use authenticate::{Authenticator, LoginOutput};
pub use config::{AuthConfig, ConfigError};
pub use error::{AuthError, AuthResult};
pub use gate::authorize;
pub use identity::IdentityResolver;
pub use password::{hash_password, verify_password};
pub use store::CredentialStore;
pub use tenant::TenantResolver;
pub use token::{Claims, TokenCodec};
