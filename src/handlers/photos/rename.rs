use axum::extract::{Extension, Form, FromRequest, Multipart, Path, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use serde::Deserialize;

use crate::api::PhotoView;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::parse_photo_id;

#[derive(Debug, Deserialize)]
pub struct ChangeTitleRequest {
    pub title: Option<String>,
}

/// POST /api/v1/photos/photo/:id/change_title/
/// POST /api/v1/photos/change_photos_name/:id/
///
/// Body: `{"title": "New Title"}` as JSON, or a `title` field posted as
/// `application/x-www-form-urlencoded` or `multipart/form-data`.
pub async fn change_title(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    request: Request,
) -> ApiResult<PhotoView> {
    let id = parse_photo_id(&id)?;
    let payload = read_title(request).await?;

    let photo = state.photos.rename(&user, id, payload.title).await?;
    Ok(ApiResponse::success("photo", photo))
}

/// Decodes the body according to its content type. Anything that is not a
/// form is treated as JSON.
async fn read_title(request: Request) -> Result<ChangeTitleRequest, ApiError> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(payload) = Form::<ChangeTitleRequest>::from_request(request, &())
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
        return Ok(payload);
    }

    if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(request, &())
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

        let mut title = None;
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(format!("Multipart error: {e}")))?
        {
            if field.name() == Some("title") {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Read error: {e}")))?;
                title = Some(value);
            }
        }
        return Ok(ChangeTitleRequest { title });
    }

    let Json(payload) = Json::<ChangeTitleRequest>::from_request(request, &())
        .await
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    Ok(payload)
}
