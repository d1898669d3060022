//! Login, current-user, and token refresh handlers.

use axum::Json;
use axum::extract::{Extension, State};
use axum::response::Response;

use crate::app::AppState;
use crate::context::{CurrentUser, TenantContext};
use crate::dto::{LoginInput, MeOut, TokenOut};
use crate::errors::auth_error_to_response;

pub async fn login(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Json(payload): Json<LoginInput>,
) -> Result<Json<TokenOut>, Response> {
    let out = state
        .authenticator
        .login(tenant.tenant(), &payload.email, &payload.password)
        .await
        .map_err(auth_error_to_response)?;

    Ok(Json(out.into()))
}

pub async fn me(Extension(current): Extension<CurrentUser>) -> Json<MeOut> {
    Json(current.user().into())
}

pub async fn refresh(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<TokenOut>, Response> {
    let out = state
        .authenticator
        .refresh(current.user(), tenant.tenant())
        .await
        .map_err(auth_error_to_response)?;

    Ok(Json(out.into()))
}
