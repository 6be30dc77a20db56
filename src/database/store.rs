use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::{NewPhoto, Owner, Photo};

/// Errors from a PhotoStore
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Photo matching query does not exist.")]
    PhotoNotFound(i64),

    #[error("User matching query does not exist.")]
    UserNotFound(i64),

    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence for photos and the owners they reference.
///
/// Every read that feeds a response goes through here, so implementations
/// must return photos with their owner already resolved.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    async fn create(&self, photo: NewPhoto) -> Result<Photo, StoreError>;

    async fn get(&self, id: i64) -> Result<Photo, StoreError>;

    /// All photos owned by `owner_id`, oldest first. Never errors on an empty set.
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Photo>, StoreError>;

    /// Adds exactly one view in a single store-side operation and returns the
    /// updated photo. Concurrent callers must never lose an increment.
    async fn increment_views(&self, id: i64) -> Result<Photo, StoreError>;

    async fn update_title(&self, id: i64, title: &str) -> Result<Photo, StoreError>;

    /// Makes sure the owner row exists, refreshing the username if it changed.
    async fn upsert_user(&self, owner: &Owner) -> Result<(), StoreError>;

    /// Removes the user together with every photo they own. Returns the
    /// number of photos removed.
    async fn delete_user(&self, user_id: i64) -> Result<u64, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
