//! # sitekit
//!
//! The entry point that assembles the application from its adapters:
//! configured storage behind the change-notifying decorator, the argon2
//! hasher, the service layer and the axum surface.

use std::sync::Arc;

use anyhow::Context;
use api_adapters::web::{router, AppState};
use auth_adapters::Argon2PasswordHasher;
use configs::{AppConfig, StorageBackend};
use domains::ports::{KeyValueStore, PasswordHasher};
use secrecy::ExposeSecret;
use services::SuperAdminCredentials;
use storage_adapters::{JsonFileStore, MemoryStore, NotifyingStore};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("loading configuration")?;

    // 1. Storage backend, wrapped so every mutation feeds the SSE stream
    let backing: Arc<dyn KeyValueStore> = match config.storage.backend {
        StorageBackend::JsonFile => {
            info!(path = %config.storage.path, "using json-file storage");
            Arc::new(JsonFileStore::open(&config.storage.path).context("opening data file")?)
        }
        StorageBackend::Memory => {
            info!("using in-memory storage");
            Arc::new(MemoryStore::new())
        }
    };
    let (changes, _) = broadcast::channel(256);
    let store: Arc<dyn KeyValueStore> = Arc::new(NotifyingStore::new(backing, changes.clone()));

    // 2. Super-admin credentials are hashed once at startup
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
    let super_hash = hasher.hash(config.super_admin.password.expose_secret())?;
    let creds = SuperAdminCredentials::new(config.super_admin.username.clone(), super_hash);

    // 3. Services
    let state = AppState::new(store, hasher, creds, changes);
    if config.storage.seed_samples && state.projects.ensure_sample_data().await? {
        info!("sample projects are ready");
    }

    // 4. Serve
    let app = router(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("sitekit listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
