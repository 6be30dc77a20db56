use axum::extract::{Extension, State};

use crate::api::PhotoView;
use crate::auth::AuthUser;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/v1/photos/gallery/ - every photo owned by the caller
///
/// ```json
/// { "gallery": [ { "title": "...", "image": "http://host/static/media/a.jpg", ... } ] }
/// ```
pub async fn gallery(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<PhotoView>> {
    let photos = state.photos.gallery(&user).await?;
    Ok(ApiResponse::success("gallery", photos))
}
