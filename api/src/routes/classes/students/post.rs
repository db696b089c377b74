use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use util::state::AppState;

use crate::response::ApiResponse;
use db::models::{
    class::Model as ClassModel, class_enrollment::Model as EnrollmentModel,
    user::Model as UserModel,
};

#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    pub user_id: i64,
    #[serde(default)]
    pub monitor: bool,
    #[serde(default)]
    pub fee_exempt: bool,
}

/// POST `/api/classes/{class_id}/students`
///
/// Enroll an approved student account into the class. Staff only (router
/// layer).
///
/// ### Responses
/// - `201 Created` with the enrollment
/// - `400 Bad Request` (staff account, unapproved account, or already enrolled)
/// - `404 Not Found` (unknown class or user)
pub async fn enroll_student(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
    Json(req): Json<EnrollRequest>,
) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let db = state.db();

    match ClassModel::find_by_id(db, class_id).await {
        Ok(Some(_)) => {}
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
    }

    let user = match UserModel::find_by_id(db, req.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("User not found")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load user");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

    if user.admin {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Staff accounts cannot be enrolled")),
        );
    }
    if !user.approved {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Account is not approved yet")),
        );
    }

    match EnrollmentModel::is_enrolled(db, class_id, req.user_id).await {
        Ok(true) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("Student is already enrolled")),
            );
        }
        Ok(false) => {}
        Err(e) => {
            tracing::error!(error = %e, "Failed to check enrollment");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    }

    match EnrollmentModel::enroll(db, class_id, req.user_id, req.monitor, req.fee_exempt).await {
        Ok(enrollment) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                serde_json::json!({
                    "class_id": enrollment.class_id,
                    "user_id": enrollment.user_id,
                    "monitor": enrollment.monitor,
                    "fee_exempt": enrollment.fee_exempt,
                }),
                "Student enrolled",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to enroll student");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}
