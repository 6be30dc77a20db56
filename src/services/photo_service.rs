use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};

use crate::api::PhotoView;
use crate::auth::AuthUser;
use crate::config::MediaConfig;
use crate::database::models::photo::{validate_description, validate_title};
use crate::database::models::{NewPhoto, Owner, Photo};
use crate::database::{PhotoStore, StoreError};
use crate::media::{MediaError, MediaStorage};

/// Field name → every message for that field
pub type FieldErrors = BTreeMap<String, Vec<String>>;

pub const REQUIRED: &str = "This field is required.";
pub const NO_FILE: &str = "No file was submitted.";
pub const NOT_A_FILE: &str = "The submitted data was not a file. Check the encoding type on the form.";

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("Photo matching query does not exist.")]
    NotFound(i64),

    #[error("You do not have permission to perform this action.")]
    Forbidden,

    #[error("Invalid input")]
    Validation(FieldErrors),

    #[error(transparent)]
    Store(StoreError),

    #[error(transparent)]
    Media(#[from] MediaError),
}

impl From<StoreError> for PhotoError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::PhotoNotFound(id) => PhotoError::NotFound(id),
            other => PhotoError::Store(other),
        }
    }
}

/// What the client sent in the `image` part of an upload.
#[derive(Debug, Clone)]
pub enum ImageInput {
    File { file_name: String, bytes: Vec<u8> },
    /// A plain form value where a file was expected
    NotAFile,
}

/// Raw add-photo submission, before validation.
#[derive(Debug, Clone, Default)]
pub struct PhotoUpload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<ImageInput>,
}

/// The photo operations, each performed on behalf of an explicit principal.
pub struct PhotoService {
    store: Arc<dyn PhotoStore>,
    media: MediaStorage,
    media_config: MediaConfig,
}

impl PhotoService {
    pub fn new(store: Arc<dyn PhotoStore>, media_config: MediaConfig) -> Self {
        Self {
            store,
            media: MediaStorage::new(media_config.media_root.clone()),
            media_config,
        }
    }

    pub fn store(&self) -> &Arc<dyn PhotoStore> {
        &self.store
    }

    fn to_view(&self, photo: &Photo) -> PhotoView {
        PhotoView::from_photo(photo, &self.media_config)
    }

    /// Looks the photo up and refuses anyone but its owner.
    async fn owned_photo(&self, user: &AuthUser, id: i64) -> Result<Photo, PhotoError> {
        let photo = self.store.get(id).await?;
        if !photo.is_owned_by(user.id) {
            warn!("User {} denied access to photo {}", user.id, id);
            return Err(PhotoError::Forbidden);
        }
        Ok(photo)
    }

    /// Every photo the user owns. An empty gallery is a normal result.
    pub async fn gallery(&self, user: &AuthUser) -> Result<Vec<PhotoView>, PhotoError> {
        let photos = self.store.list_by_owner(user.id).await?;
        Ok(photos.iter().map(|p| self.to_view(p)).collect())
    }

    /// Shows a photo to its owner, counting the view.
    pub async fn view(&self, user: &AuthUser, id: i64) -> Result<PhotoView, PhotoError> {
        self.owned_photo(user, id).await?;
        let photo = self.store.increment_views(id).await?;
        Ok(self.to_view(&photo))
    }

    pub async fn rename(
        &self,
        user: &AuthUser,
        id: i64,
        title: Option<String>,
    ) -> Result<PhotoView, PhotoError> {
        self.owned_photo(user, id).await?;

        let mut errors = FieldErrors::new();
        let title = match title {
            None => {
                errors.insert("title".into(), vec![REQUIRED.into()]);
                None
            }
            Some(title) => match validate_title(&title) {
                Ok(title) => Some(title),
                Err(msg) => {
                    errors.insert("title".into(), vec![msg]);
                    None
                }
            },
        };
        let title = title.ok_or(PhotoError::Validation(errors))?;

        let photo = self.store.update_title(id, &title).await?;
        info!("User {} renamed photo {}", user.id, id);
        Ok(self.to_view(&photo))
    }

    pub async fn add(&self, user: &AuthUser, upload: PhotoUpload) -> Result<PhotoView, PhotoError> {
        let (title, description, (file_name, bytes)) = validate_upload(upload)?;

        let owner = Owner::from(user);
        self.store.upsert_user(&owner).await?;

        let image = self.media.save(&file_name, &bytes).await?;
        let created = self
            .store
            .create(NewPhoto {
                title,
                description,
                image: image.clone(),
                owner,
                date_of_creation: Utc::now().date_naive(),
            })
            .await;

        let photo = match created {
            Ok(photo) => photo,
            Err(err) => {
                // No row references the stored file
                if let Err(cleanup) = self.media.remove(&image).await {
                    warn!("Failed to remove orphaned upload {}: {}", image, cleanup);
                }
                return Err(err.into());
            }
        };

        info!("User {} added photo {} ({})", user.id, photo.id, photo.image);
        Ok(self.to_view(&photo))
    }
}

/// Checks every field of an upload and reports all problems at once.
fn validate_upload(upload: PhotoUpload) -> Result<(String, String, (String, Vec<u8>)), PhotoError> {
    let mut errors = FieldErrors::new();

    let title = match upload.title {
        None => {
            errors.insert("title".into(), vec![REQUIRED.into()]);
            None
        }
        Some(title) => match validate_title(&title) {
            Ok(title) => Some(title),
            Err(msg) => {
                errors.insert("title".into(), vec![msg]);
                None
            }
        },
    };

    let description = match validate_description(&upload.description.unwrap_or_default()) {
        Ok(description) => description,
        Err(msg) => {
            errors.insert("description".into(), vec![msg]);
            String::new()
        }
    };

    let image = match upload.image {
        None => {
            errors.insert("image".into(), vec![NO_FILE.into()]);
            None
        }
        Some(ImageInput::NotAFile) => {
            errors.insert("image".into(), vec![NOT_A_FILE.into()]);
            None
        }
        Some(ImageInput::File { file_name, bytes }) => match MediaStorage::verify_image(&bytes) {
            Ok(_) => Some((file_name, bytes)),
            Err(err) => {
                errors.insert("image".into(), vec![err.to_string()]);
                None
            }
        },
    };

    match (title, image) {
        (Some(title), Some(image)) if errors.is_empty() => Ok((title, description, image)),
        _ => Err(PhotoError::Validation(errors)),
    }
}
