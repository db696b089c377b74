use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, IntoActiveModel};
use util::state::AppState;

use super::common::{ClassDto, ClassRequest};
use crate::response::ApiResponse;
use db::models::class::Model as ClassModel;

/// PUT `/api/classes/{class_id}`
///
/// Replace a class's details. Staff only (router layer).
pub async fn edit_class(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
    Json(req): Json<ClassRequest>,
) -> (StatusCode, Json<ApiResponse<ClassDto>>) {
    if let Some(message) = req.validation_message() {
        return (StatusCode::BAD_REQUEST, Json(ApiResponse::error(message)));
    }

    let db = state.db();

    let class = match ClassModel::find_by_id(db, class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Class not found")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load class");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

    let mut active = class.into_active_model();
    active.name = Set(req.name);
    active.grade = Set(req.grade);
    active.category = Set(req.category);
    active.monthly_fee = Set(req.monthly_fee);
    active.free_class = Set(req.free_class);
    active.updated_at = Set(chrono::Utc::now());

    match active.update(db).await {
        Ok(class) => (
            StatusCode::OK,
            Json(ApiResponse::success(ClassDto::from(class), "Class updated")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to update class");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}
