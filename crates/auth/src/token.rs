//! Session token codec: HS256 JWT issuance and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use mediscribe_core::{TenantId, UserId};

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Claims embedded in every session token.
///
/// # Invariants
/// - `tenant_id` always equals the `tenant_id` of the user the token was
///   minted for; [`crate::Authenticator`] is the only minting path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the authenticated user.
    pub sub: UserId,
    /// Tenant the user authenticated against.
    pub tenant_id: TenantId,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

/// Symmetric signer/verifier for session tokens.
///
/// Pure, in-memory, no suspension points. One instance per process, built
/// from [`AuthConfig`] at startup and shared behind an `Arc`.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    default_ttl_minutes: i64,
}

impl TokenCodec {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Exact wall-clock expiry; the default 60s leeway would let freshly
        // expired tokens through.
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            default_ttl_minutes: config.token_ttl_minutes,
        }
    }

    /// Token lifetime reported to clients, in minutes.
    pub fn default_ttl_minutes(&self) -> i64 {
        self.default_ttl_minutes
    }

    /// Issue a signed token for `(user, tenant)` expiring `ttl_minutes`
    /// from now (the configured default when `None`).
    pub fn issue(
        &self,
        user_id: UserId,
        tenant_id: TenantId,
        ttl_minutes: Option<i64>,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let ttl = ttl_minutes.unwrap_or(self.default_ttl_minutes);
        let claims = Claims {
            sub: user_id,
            tenant_id,
            iat: now.timestamp(),
            exp: (now + Duration::minutes(ttl)).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Crypto(format!("token encode: {e}")))
    }

    /// Verify signature and expiry, returning the embedded claims.
    ///
    /// A well-formed token past its expiry fails with [`AuthError::TokenExpired`];
    /// any signature mismatch, malformed payload, or missing claim fails with
    /// [`AuthError::TokenInvalid`]. The two kinds never collapse.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn codec() -> TokenCodec {
        let config = AuthConfig::new("unit-test-secret", 60).unwrap();
        TokenCodec::new(&config)
    }

    #[test]
    fn issue_then_decode_round_trips() {
        let codec = codec();
        let user_id = UserId::new();
        let tenant_id = TenantId::new();

        let token = codec.issue(user_id, tenant_id, None).unwrap();
        let claims = codec.decode(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.tenant_id, tenant_id);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn negative_ttl_is_expired_not_invalid() {
        let codec = codec();
        let token = codec.issue(UserId::new(), TenantId::new(), Some(-1)).unwrap();

        assert!(matches!(
            codec.decode(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn per_call_ttl_overrides_default() {
        let config = AuthConfig::new("unit-test-secret", 60).unwrap();
        let codec = TokenCodec::new(&config);

        let token = codec.issue(UserId::new(), TenantId::new(), Some(5)).unwrap();
        let claims = codec.decode(&token).unwrap();

        let lifetime = claims.exp - claims.iat;
        assert_eq!(lifetime, 5 * 60);
    }

    #[test]
    fn other_secret_does_not_verify() {
        let codec_a = codec();
        let config_b = AuthConfig::new("a-different-secret", 60).unwrap();
        let codec_b = TokenCodec::new(&config_b);

        let token = codec_a.issue(UserId::new(), TenantId::new(), None).unwrap();
        assert!(matches!(
            codec_b.decode(&token),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn garbage_is_invalid() {
        let codec = codec();
        for garbage in ["", "not-a-jwt", "a.b.c", "e30.e30."] {
            assert!(matches!(
                codec.decode(garbage),
                Err(AuthError::TokenInvalid)
            ));
        }
    }

    proptest! {
        /// Flipping any single character of a valid token must fail
        /// verification — near-matches are not tolerated.
        #[test]
        fn single_character_tampering_is_rejected(pos in 0usize..512, replacement in "[A-Za-z0-9]") {
            let codec = codec();
            let token = codec.issue(UserId::new(), TenantId::new(), None).unwrap();

            let mut chars: Vec<char> = token.chars().collect();
            let idx = pos % chars.len();
            let replacement = replacement.chars().next().unwrap();
            prop_assume!(chars[idx] != replacement);
            chars[idx] = replacement;
            let tampered: String = chars.into_iter().collect();

            prop_assert!(codec.decode(&tampered).is_err());
        }
    }
}
