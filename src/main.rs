use photo_gallery::server::{self, StoreKind};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = photo_gallery::config::config().clone();
    if photo_gallery::is_development!() {
        tracing::info!("Development mode: a built-in JWT secret is used unless JWT_SECRET is set");
    }

    let kind = match std::env::var("GALLERY_STORE").as_deref() {
        Ok("memory") => StoreKind::Memory,
        _ => StoreKind::Postgres,
    };

    server::run(config, kind).await
}
