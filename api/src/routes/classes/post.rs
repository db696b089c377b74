use axum::{Json, extract::State, http::StatusCode};
use util::state::AppState;

use super::common::{ClassDto, ClassRequest};
use crate::response::ApiResponse;
use db::models::class::Model as ClassModel;

/// POST `/api/classes`
///
/// Create a class. Staff only (router layer).
pub async fn create_class(
    State(state): State<AppState>,
    Json(req): Json<ClassRequest>,
) -> (StatusCode, Json<ApiResponse<ClassDto>>) {
    if let Some(message) = req.validation_message() {
        return (StatusCode::BAD_REQUEST, Json(ApiResponse::error(message)));
    }

    match ClassModel::create(
        state.db(),
        &req.name,
        &req.grade,
        &req.category,
        req.monthly_fee,
        req.free_class,
    )
    .await
    {
        Ok(class) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(ClassDto::from(class), "Class created")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create class");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}
