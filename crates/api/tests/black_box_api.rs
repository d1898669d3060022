//! Black-box tests against the real router on an ephemeral port.
//!
//! These drive the full stack — tenant header middleware, bearer auth,
//! role gating, error mapping — over the wire with a seeded in-memory
//! credential store.

use std::sync::Arc;

use axum::Router;
use axum::extract::Request;
use axum::http::StatusCode as AxumStatus;
use axum::middleware::Next;
use axum::routing::get;
use reqwest::StatusCode;
use serde_json::Value;

use mediscribe_api::app::{AppState, build_app};
use mediscribe_api::middleware;
use mediscribe_auth::{AuthConfig, CredentialStore, hash_password};
use mediscribe_core::{Role, Tenant, TenantId, User, UserId};
use mediscribe_store::MemoryCredentialStore;

const SECRET: &str = "black-box-test-secret";
const TENANT_HEADER: &str = "X-Tenant-Code";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(app: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn seed_tenant(store: &MemoryCredentialStore, code: &str, is_active: bool) -> Tenant {
    let now = chrono::Utc::now();
    let tenant = Tenant {
        id: TenantId::new(),
        code: code.to_string(),
        name: code.to_string(),
        is_active,
        created_at: now,
        updated_at: now,
    };
    store.insert_tenant(tenant.clone());
    tenant
}

fn seed_user(
    store: &MemoryCredentialStore,
    tenant_id: TenantId,
    email: &str,
    password: &str,
    role: Role,
) -> User {
    let now = chrono::Utc::now();
    let user = User {
        id: UserId::new(),
        tenant_id,
        email: email.to_string(),
        full_name: "Doc Martin".to_string(),
        role,
        password_hash: hash_password(password).unwrap(),
        is_active: true,
        last_login: None,
        created_at: now,
        updated_at: now,
    };
    store.insert_user(user.clone());
    user
}

/// Standard fixture: two active clinics, one dormant, a staff doctor and
/// an admin in clinic-1.
fn seed() -> Arc<MemoryCredentialStore> {
    let store = MemoryCredentialStore::new();
    let clinic_1 = seed_tenant(&store, "clinic-1", true);
    seed_tenant(&store, "clinic-2", true);
    seed_tenant(&store, "old-clinic", false);
    seed_user(&store, clinic_1.id, "doc@x.com", "secret123", Role::Staff);
    seed_user(&store, clinic_1.id, "admin@x.com", "hunter2!!", Role::Admin);
    Arc::new(store)
}

async fn spawn_app() -> TestServer {
    let config = AuthConfig::new(SECRET, 60).unwrap();
    let store: Arc<dyn CredentialStore> = seed();
    TestServer::spawn(build_app(store, &config)).await
}

async fn login(server: &TestServer, tenant_code: &str, email: &str, password: &str) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}/auth/login", server.base_url))
        .header(TENANT_HEADER, tenant_code)
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await
        .unwrap()
}

async fn login_token(server: &TestServer, tenant_code: &str, email: &str, password: &str) -> String {
    let res = login(server, tenant_code, email, password).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_needs_no_tenant_or_token() {
    let server = spawn_app().await;
    let res = reqwest::get(format!("{}/health", server.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_returns_a_bearer_token() {
    let server = spawn_app().await;
    let res = login(&server, "clinic-1", "doc@x.com", "secret123").await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await.unwrap();
    assert!(!body["access_token"].as_str().unwrap().is_empty());
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["expires_in"], 60);
}

#[tokio::test]
async fn me_round_trips_the_logged_in_user() {
    let server = spawn_app().await;
    let token = login_token(&server, "clinic-1", "doc@x.com", "secret123").await;

    let res = reqwest::Client::new()
        .get(format!("{}/auth/me", server.base_url))
        .header(TENANT_HEADER, "clinic-1")
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["email"], "doc@x.com");
    assert_eq!(body["role"], "staff");
    // The hash never appears on the wire, under any field name.
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let server = spawn_app().await;

    let wrong_password = login(&server, "clinic-1", "doc@x.com", "wrongpass").await;
    let wrong_status = wrong_password.status();
    let wrong_body: Value = wrong_password.json().await.unwrap();

    let unknown_email = login(&server, "clinic-1", "nobody@x.com", "secret123").await;
    let unknown_status = unknown_email.status();
    let unknown_body: Value = unknown_email.json().await.unwrap();

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, wrong_status);
    assert_eq!(unknown_body, wrong_body);
}

#[tokio::test]
async fn missing_or_unknown_tenant_header_is_not_found() {
    let server = spawn_app().await;

    let no_header = reqwest::Client::new()
        .post(format!("{}/auth/login", server.base_url))
        .json(&serde_json::json!({ "email": "doc@x.com", "password": "secret123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(no_header.status(), StatusCode::NOT_FOUND);

    let unknown = login(&server, "no-such-clinic", "doc@x.com", "secret123").await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn inactive_tenant_is_not_found() {
    let server = spawn_app().await;
    let res = login(&server, "old-clinic", "doc@x.com", "secret123").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bearer_token_does_not_cross_tenants() {
    let server = spawn_app().await;
    let token = login_token(&server, "clinic-1", "doc@x.com", "secret123").await;

    // clinic-2 is real and active; the token still must not work there.
    let res = reqwest::Client::new()
        .get(format!("{}/auth/me", server.base_url))
        .header(TENANT_HEADER, "clinic-2")
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // The body gives no hint of which binding check failed.
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "unauthorized");
}

#[tokio::test]
async fn tampered_or_missing_token_is_unauthorized() {
    let server = spawn_app().await;
    let token = login_token(&server, "clinic-1", "doc@x.com", "secret123").await;

    let mut tampered = token.into_bytes();
    let last = tampered.last_mut().unwrap();
    *last = if *last == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(tampered).unwrap();

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/auth/me", server.base_url))
        .header(TENANT_HEADER, "clinic-1")
        .bearer_auth(&tampered)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/auth/me", server.base_url))
        .header(TENANT_HEADER, "clinic-1")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_issues_a_usable_fresh_token() {
    let server = spawn_app().await;
    let token = login_token(&server, "clinic-1", "doc@x.com", "secret123").await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/auth/refresh", server.base_url))
        .header(TENANT_HEADER, "clinic-1")
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    let fresh = body["access_token"].as_str().unwrap();

    let res = client
        .get(format!("{}/auth/me", server.base_url))
        .header(TENANT_HEADER, "clinic-1")
        .bearer_auth(fresh)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

/// Router with one owner/admin-gated route, wired exactly as a business
/// router would attach `require_roles`.
fn build_gated_app(store: Arc<dyn CredentialStore>, config: &AuthConfig) -> Router {
    let state = AppState::new(store, config);

    Router::new()
        .route("/admin/ping", get(|| async { AxumStatus::NO_CONTENT }))
        .route_layer(axum::middleware::from_fn(|req: Request, next: Next| {
            middleware::require_roles(&[Role::Owner, Role::Admin], req, next)
        }))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::tenant_middleware,
        ))
        .with_state(state)
}

#[tokio::test]
async fn role_gate_forbids_staff_and_admits_admin() {
    let config = AuthConfig::new(SECRET, 60).unwrap();
    let store: Arc<dyn CredentialStore> = seed();
    let server = TestServer::spawn(build_app(store.clone(), &config)).await;
    let gated = TestServer::spawn(build_gated_app(store, &config)).await;

    let staff_token = login_token(&server, "clinic-1", "doc@x.com", "secret123").await;
    let admin_token = login_token(&server, "clinic-1", "admin@x.com", "hunter2!!").await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/admin/ping", gated.base_url))
        .header(TENANT_HEADER, "clinic-1")
        .bearer_auth(&staff_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .get(format!("{}/admin/ping", gated.base_url))
        .header(TENANT_HEADER, "clinic-1")
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}
