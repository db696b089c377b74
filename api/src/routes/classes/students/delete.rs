use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sea_orm::ModelTrait;
use util::state::AppState;

use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use db::models::class_enrollment::Model as EnrollmentModel;

/// DELETE `/api/classes/{class_id}/students/{user_id}`
///
/// Remove a student from the class roster. Staff only (router layer).
pub async fn unenroll_student(
    State(state): State<AppState>,
    Path((class_id, user_id)): Path<(i64, i64)>,
) -> (StatusCode, Json<ApiResponse<Empty>>) {
    let db = state.db();

    let enrollment = match EnrollmentModel::find(db, class_id, user_id).await {
        Ok(Some(enrollment)) => enrollment,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Enrollment not found")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load enrollment");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

    match enrollment.delete(db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty {}, "Student unenrolled")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to unenroll student");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}
