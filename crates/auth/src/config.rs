//! Auth configuration.

use thiserror::Error;

/// Insecure development default that must never reach production. Booting
/// with this value (or no value at all) is a fatal startup error, not a
/// per-request condition.
const PLACEHOLDER_SECRET: &str = "change-me";

/// Default token lifetime when `JWT_EXPIRES_MIN` is not set.
const DEFAULT_TTL_MINUTES: i64 = 60;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET is not set")]
    MissingSecret,

    #[error("JWT_SECRET is set to the insecure placeholder value")]
    PlaceholderSecret,

    #[error("JWT_EXPIRES_MIN is not a valid integer: {0}")]
    InvalidTtl(String),
}

/// Process-wide auth configuration.
///
/// Constructed once at startup and shared; the signing secret is never read
/// from the environment again after boot.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Token lifetime in minutes. The login response reports the same unit.
    pub token_ttl_minutes: i64,
}

impl AuthConfig {
    /// Build a config, rejecting an absent or placeholder secret.
    pub fn new(jwt_secret: impl Into<String>, token_ttl_minutes: i64) -> Result<Self, ConfigError> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        if jwt_secret == PLACEHOLDER_SECRET {
            return Err(ConfigError::PlaceholderSecret);
        }
        Ok(Self {
            jwt_secret,
            token_ttl_minutes,
        })
    }

    /// Load from `JWT_SECRET` / `JWT_EXPIRES_MIN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = std::env::var("JWT_SECRET").map_err(|_| ConfigError::MissingSecret)?;

        let ttl = match std::env::var("JWT_EXPIRES_MIN") {
            Ok(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidTtl(raw))?,
            Err(_) => DEFAULT_TTL_MINUTES,
        };

        Self::new(secret, ttl)
    }
}
