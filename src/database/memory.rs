use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::models::{NewPhoto, Owner, Photo};
use crate::database::store::{PhotoStore, StoreError};

#[derive(Default)]
struct Tables {
    next_id: i64,
    photos: BTreeMap<i64, Photo>,
    users: HashMap<i64, Owner>,
}

/// Process-local store for development runs and tests.
#[derive(Default)]
pub struct MemoryPhotoStore {
    tables: RwLock<Tables>,
}

impl MemoryPhotoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the stored view counter. Only useful for exercising
    /// serialization of out-of-range values.
    pub async fn set_views(&self, id: i64, views: i64) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let photo = tables.photos.get_mut(&id).ok_or(StoreError::PhotoNotFound(id))?;
        photo.count_of_views = views;
        Ok(())
    }
}

#[async_trait]
impl PhotoStore for MemoryPhotoStore {
    async fn create(&self, photo: NewPhoto) -> Result<Photo, StoreError> {
        let mut tables = self.tables.write().await;
        let owner = tables
            .users
            .get(&photo.owner.id)
            .cloned()
            .ok_or(StoreError::UserNotFound(photo.owner.id))?;

        tables.next_id += 1;
        let id = tables.next_id;
        let created = Photo {
            id,
            title: photo.title,
            description: photo.description,
            count_of_views: 0,
            date_of_creation: photo.date_of_creation,
            image: photo.image,
            owner,
        };
        tables.photos.insert(id, created.clone());
        Ok(created)
    }

    async fn get(&self, id: i64) -> Result<Photo, StoreError> {
        let tables = self.tables.read().await;
        tables.photos.get(&id).cloned().ok_or(StoreError::PhotoNotFound(id))
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Photo>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .photos
            .values()
            .filter(|p| p.is_owned_by(owner_id))
            .cloned()
            .collect())
    }

    async fn increment_views(&self, id: i64) -> Result<Photo, StoreError> {
        let mut tables = self.tables.write().await;
        let photo = tables.photos.get_mut(&id).ok_or(StoreError::PhotoNotFound(id))?;
        photo.count_of_views += 1;
        Ok(photo.clone())
    }

    async fn update_title(&self, id: i64, title: &str) -> Result<Photo, StoreError> {
        let mut tables = self.tables.write().await;
        let photo = tables.photos.get_mut(&id).ok_or(StoreError::PhotoNotFound(id))?;
        photo.title = title.to_string();
        Ok(photo.clone())
    }

    async fn upsert_user(&self, owner: &Owner) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.users.insert(owner.id, owner.clone());
        for photo in tables.photos.values_mut().filter(|p| p.owner.id == owner.id) {
            photo.owner.username = owner.username.clone();
        }
        Ok(())
    }

    async fn delete_user(&self, user_id: i64) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&user_id).is_none() {
            return Err(StoreError::UserNotFound(user_id));
        }
        let before = tables.photos.len();
        tables.photos.retain(|_, p| p.owner.id != user_id);
        Ok((before - tables.photos.len()) as u64)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
