use axum::extract::{multipart::MultipartRejection, Extension, Multipart, State};

use crate::api::PhotoView;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{ImageInput, PhotoUpload};
use crate::state::AppState;

/// POST /api/v1/photos/add/ - upload a new photo
///
/// Multipart form with `title`, optional `description` and an `image` file.
/// Validation failures list every offending field:
///
/// ```json
/// { "message": "fail", "description": { "title": ["This field is required."], "image": ["No file was submitted."] } }
/// ```
pub async fn add_photo(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<PhotoView> {
    let multipart = multipart.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let upload = read_upload(multipart).await?;

    let photo = state.photos.add(&user, upload).await?;
    Ok(ApiResponse::success("photo", photo))
}

/// Collects the known form parts. Unknown parts are ignored; a repeated
/// part keeps its last value.
async fn read_upload(mut multipart: Multipart) -> Result<PhotoUpload, ApiError> {
    let mut upload = PhotoUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => upload.title = Some(read_text(field).await?),
            "description" => upload.description = Some(read_text(field).await?),
            "image" => {
                let file_name = field.file_name().map(str::to_string);
                upload.image = Some(match file_name {
                    Some(file_name) => {
                        let bytes = field
                            .bytes()
                            .await
                            .map_err(|e| ApiError::bad_request(format!("Read error: {e}")))?;
                        ImageInput::File {
                            file_name,
                            bytes: bytes.to_vec(),
                        }
                    }
                    None => ImageInput::NotAFile,
                });
            }
            other => tracing::debug!("Ignoring unexpected form field '{}'", other),
        }
    }

    Ok(upload)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::bad_request(format!("Read error: {e}")))
}
