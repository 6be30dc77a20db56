use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::PhotoStore;
use crate::services::PhotoService;

/// Shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub photos: Arc<PhotoService>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn PhotoStore>) -> Self {
        let photos = PhotoService::new(store, config.media.clone());
        Self {
            config: Arc::new(config),
            photos: Arc::new(photos),
        }
    }
}
