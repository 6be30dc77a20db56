use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - service name, version and route overview
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "Photo Gallery API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "gallery": "GET /api/v1/photos/gallery/",
            "photo": "GET /api/v1/photos/photo/:id/",
            "change_title": "POST /api/v1/photos/photo/:id/change_title/",
            "change_photos_name": "POST /api/v1/photos/change_photos_name/:id/",
            "add": "POST /api/v1/photos/add/",
            "health": "GET /health",
        }
    }))
}

/// GET /health - reports whether the photo store answers
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.photos.store().health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "message": "fail",
                    "description": "database unavailable",
                    "status": "degraded",
                    "timestamp": now
                })),
            )
        }
    }
}
