use std::sync::Arc;

use mediscribe_auth::{AuthConfig, CredentialStore};
use mediscribe_store::{MemoryCredentialStore, PgCredentialStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mediscribe_observability::init();

    // A missing or placeholder JWT_SECRET aborts here, before anything
    // binds — never a per-request condition.
    let config = AuthConfig::from_env()?;

    let store: Arc<dyn CredentialStore> = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let pool = mediscribe_store::postgres::connect(&url).await?;
            Arc::new(PgCredentialStore::new(pool))
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using volatile in-memory credential store");
            Arc::new(MemoryCredentialStore::new())
        }
    };

    let app = mediscribe_api::app::build_app(store, &config);

    let port: u16 = match std::env::var("API_PORT") {
        Ok(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("API_PORT is not a valid port: {raw}"))?,
        Err(_) => 8080,
    };

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
