use axum::extract::{Extension, Path, State};

use crate::api::PhotoView;
use crate::auth::AuthUser;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::parse_photo_id;

/// GET /api/v1/photos/photo/:id/ - show one photo and count the view
pub async fn view_photo(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<PhotoView> {
    let id = parse_photo_id(&id)?;
    let photo = state.photos.view(&user, id).await?;
    Ok(ApiResponse::success("photo", photo))
}
