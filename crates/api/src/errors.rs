//! The single translation from typed auth failures to HTTP responses.
//!
//! Two rules the mapping must not break:
//! - `UserNotFound` and `InvalidCredentials` produce byte-identical
//!   responses (no user enumeration);
//! - `Unauthorized` never says which tenant-binding check failed.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use mediscribe_auth::AuthError;

pub fn auth_error_to_response(err: AuthError) -> axum::response::Response {
    match err {
        AuthError::TenantNotFound | AuthError::TenantInactive => {
            tracing::debug!(kind = ?err, "tenant resolution failed");
            json_error(
                StatusCode::NOT_FOUND,
                "tenant_not_found",
                "tenant not found or inactive",
            )
        }
        AuthError::UserNotFound | AuthError::InvalidCredentials => {
            // Distinct kinds for the log line only.
            tracing::debug!(kind = ?err, "login rejected");
            json_error(
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "invalid credentials",
            )
        }
        AuthError::TokenExpired => {
            tracing::debug!("expired bearer token");
            json_error(StatusCode::UNAUTHORIZED, "unauthorized", "unauthorized")
        }
        AuthError::TokenInvalid => {
            // A signature that does not verify may be tampering.
            tracing::warn!("invalid bearer token");
            json_error(StatusCode::UNAUTHORIZED, "unauthorized", "unauthorized")
        }
        AuthError::Unauthorized => {
            tracing::warn!("request identity rejected");
            json_error(StatusCode::UNAUTHORIZED, "unauthorized", "unauthorized")
        }
        AuthError::Forbidden(detail) => {
            tracing::debug!(%detail, "request forbidden");
            json_error(StatusCode::FORBIDDEN, "forbidden", "forbidden")
        }
        AuthError::Store(e) => {
            tracing::error!(error = ?e, "credential store failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal error",
            )
        }
        AuthError::Crypto(msg) => {
            tracing::error!(%msg, "crypto failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal error",
            )
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
