//! Request middleware: tenant resolution, bearer auth, role gating.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use mediscribe_auth::{AuthError, authorize};
use mediscribe_core::Role;

use crate::app::AppState;
use crate::context::{CurrentUser, TenantContext};
use crate::errors::auth_error_to_response;

/// Side-channel header carrying the tenant code.
pub const TENANT_HEADER: &str = "x-tenant-code";

/// Resolve the tenant from `X-Tenant-Code` and stash it in extensions.
///
/// Applied to every tenant-scoped route, including login — credentials are
/// only ever verified against a resolved, active tenant.
pub async fn tenant_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let code = req
        .headers()
        .get(TENANT_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let tenant = state
        .tenants
        .resolve(code.as_deref())
        .await
        .map_err(auth_error_to_response)?;

    req.extensions_mut().insert(TenantContext::new(tenant));
    Ok(next.run(req).await)
}

/// Resolve the current user from the bearer token and stash it in
/// extensions. Requires [`tenant_middleware`] to have run first.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let Some(tenant) = req.extensions().get::<TenantContext>().cloned() else {
        return Err(auth_error_to_response(AuthError::TenantNotFound));
    };

    let bearer = extract_bearer(req.headers()).map(str::to_owned);

    let user = state
        .identity
        .resolve(bearer.as_deref(), tenant.tenant())
        .await
        .map_err(auth_error_to_response)?;

    req.extensions_mut().insert(CurrentUser::new(user));
    Ok(next.run(req).await)
}

/// Gate a route on a static allowed-role set.
///
/// Attach per route table, after [`auth_middleware`]:
///
/// ```ignore
/// .route_layer(axum::middleware::from_fn(|req: Request, next: Next| {
///     middleware::require_roles(&[Role::Owner, Role::Admin], req, next)
/// }))
/// ```
pub async fn require_roles(
    allowed: &'static [Role],
    req: Request,
    next: Next,
) -> Result<Response, Response> {
    let Some(current) = req.extensions().get::<CurrentUser>().cloned() else {
        return Err(auth_error_to_response(AuthError::Unauthorized));
    };

    authorize(current.user(), allowed).map_err(auth_error_to_response)?;
    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
