use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::database::{MemoryPhotoStore, PgPhotoStore, PhotoStore};
use crate::routes::app;
use crate::state::AppState;

/// Which store the server should run against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

pub async fn open_store(config: &AppConfig, kind: StoreKind) -> anyhow::Result<Arc<dyn PhotoStore>> {
    match kind {
        StoreKind::Memory => {
            warn!("Using the in-memory photo store; nothing survives a restart");
            Ok(Arc::new(MemoryPhotoStore::new()))
        }
        StoreKind::Postgres => {
            let store = PgPhotoStore::connect(&config.database)
                .await
                .context("failed to connect to the photo database")?;
            store.ensure_schema().await.context("failed to create the photo schema")?;
            Ok(Arc::new(store))
        }
    }
}

/// Binds the configured port and serves until the process is stopped.
pub async fn run(config: AppConfig, kind: StoreKind) -> anyhow::Result<()> {
    config.validate()?;
    info!("Starting Photo Gallery API in {:?} mode", config.environment);

    let store = open_store(&config, kind).await?;
    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let router = app(AppState::new(config, store));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Photo Gallery API listening on http://{}", bind_addr);
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
