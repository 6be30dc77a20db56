use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const TITLE_MAX_CHARS: usize = 256;
pub const DESCRIPTION_MAX_CHARS: usize = 512;

/// The user a photo belongs to. Identity lives with the auth provider; only
/// what the API needs to enforce and show ownership is kept here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Owner {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub count_of_views: i64,
    pub date_of_creation: NaiveDate,
    /// Path relative to the media root
    pub image: String,
    pub owner: Owner,
}

impl Photo {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner.id == user_id
    }
}

/// Flat row as returned by the `photos JOIN users` select.
#[derive(Debug, FromRow)]
pub struct PhotoRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub count_of_views: i64,
    pub date_of_creation: NaiveDate,
    pub image: String,
    pub user_id: i64,
    pub username: String,
}

impl From<PhotoRow> for Photo {
    fn from(row: PhotoRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            count_of_views: row.count_of_views,
            date_of_creation: row.date_of_creation,
            image: row.image,
            owner: Owner {
                id: row.user_id,
                username: row.username,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub title: String,
    pub description: String,
    pub image: String,
    pub owner: Owner,
    pub date_of_creation: NaiveDate,
}

/// Title rules shared by creation and rename. Returns the title to store,
/// with surrounding whitespace removed before the checks run.
pub fn validate_title(title: &str) -> Result<String, String> {
    let title = title.trim();
    if title.is_empty() {
        return Err("This field may not be blank.".to_string());
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(format!(
            "Ensure this field has no more than {} characters.",
            TITLE_MAX_CHARS
        ));
    }
    Ok(title.to_string())
}

pub fn validate_description(description: &str) -> Result<String, String> {
    let description = description.trim();
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(format!(
            "Ensure this field has no more than {} characters.",
            DESCRIPTION_MAX_CHARS
        ));
    }
    Ok(description.to_string())
}
