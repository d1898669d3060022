//! `mediscribe-store` — credential store implementations.
//!
//! Two implementations of the [`mediscribe_auth::CredentialStore`] seam:
//! a Postgres adapter ([`postgres::PgCredentialStore`]) for production and an
//! in-memory map ([`memory::MemoryCredentialStore`]) for tests and local
//! development.

pub mod memory;
pub mod postgres;

pub use memory::MemoryCredentialStore;
pub use postgres::PgCredentialStore;
