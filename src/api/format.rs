use chrono::NaiveDate;
use serde::Serialize;

use crate::config::MediaConfig;
use crate::database::models::{Owner, Photo};
use crate::media::public_url;

/// Wire form of a photo. Field order here is the order clients see.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoView {
    pub title: String,
    pub description: String,
    pub count_of_views: u64,
    pub date_of_creation: NaiveDate,
    pub image: String,
    pub user: OwnerView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerView {
    pub id: i64,
    pub username: String,
}

impl From<&Owner> for OwnerView {
    fn from(owner: &Owner) -> Self {
        Self {
            id: owner.id,
            username: owner.username.clone(),
        }
    }
}

impl PhotoView {
    pub fn from_photo(photo: &Photo, media: &MediaConfig) -> Self {
        Self {
            title: photo.title.clone(),
            description: photo.description.clone(),
            // Stored values below zero are never surfaced
            count_of_views: photo.count_of_views.max(0) as u64,
            date_of_creation: photo.date_of_creation,
            image: public_url(media, &photo.image),
            user: OwnerView::from(&photo.owner),
        }
    }
}
