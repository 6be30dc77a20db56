use crate::config::AppConfig;
use crate::server::{self, StoreKind};

pub async fn handle(config: AppConfig, memory: bool) -> anyhow::Result<()> {
    let kind = if memory { StoreKind::Memory } else { StoreKind::Postgres };
    server::run(config, kind).await
}
