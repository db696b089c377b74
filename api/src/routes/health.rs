use axum::{Json, Router, http::StatusCode, routing::get};
use util::state::AppState;

use crate::response::ApiResponse;

/// GET `/api/health`
///
/// Liveness probe; returns the project name.
async fn health() -> (StatusCode, Json<ApiResponse<String>>) {
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            util::config::project_name(),
            "Service is healthy",
        )),
    )
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health))
}
