//! Router + state wiring (public entrypoint used by `main.rs`).

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Router, middleware};

use mediscribe_auth::{
    AuthConfig, Authenticator, CredentialStore, IdentityResolver, TenantResolver, TokenCodec,
};

use crate::routes;

/// Shared application state: the auth core components, each holding the
/// injected credential store and the process-wide token codec.
#[derive(Clone)]
pub struct AppState {
    pub tenants: TenantResolver,
    pub authenticator: Authenticator,
    pub identity: IdentityResolver,
}

impl AppState {
    pub fn new(store: Arc<dyn CredentialStore>, config: &AuthConfig) -> Self {
        let codec = Arc::new(TokenCodec::new(config));
        Self {
            tenants: TenantResolver::new(store.clone()),
            authenticator: Authenticator::new(store.clone(), codec.clone()),
            identity: IdentityResolver::new(store, codec),
        }
    }
}

/// Build the full HTTP router.
///
/// Layering (outermost first): tenant resolution wraps everything
/// tenant-scoped; bearer auth wraps the authenticated subset; role gates
/// are attached per route table by the routers that need them.
pub fn build_app(store: Arc<dyn CredentialStore>, config: &AuthConfig) -> Router {
    let state = AppState::new(store, config);

    let authenticated = Router::new()
        .route("/auth/me", get(routes::auth::me))
        .route("/auth/refresh", post(routes::auth::refresh))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth_middleware,
        ));

    let tenant_scoped = Router::new()
        .route("/auth/login", post(routes::auth::login))
        .merge(authenticated)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::tenant_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(tenant_scoped)
        .with_state(state)
}
