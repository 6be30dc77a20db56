pub mod add;
pub mod gallery;
pub mod photo;
pub mod rename;

pub use add::add_photo;
pub use gallery::gallery;
pub use photo::view_photo;
pub use rename::change_title;

use crate::error::ApiError;
use crate::services::PhotoError;

/// Ids that do not parse can never match a photo.
pub(crate) fn parse_photo_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| PhotoError::NotFound(0).into())
}
