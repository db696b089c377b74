use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, IntoActiveModel};
use serde::Deserialize;
use util::state::AppState;

use crate::response::ApiResponse;
use db::models::class_enrollment::Model as EnrollmentModel;

/// Partial update; omitted flags are left untouched.
#[derive(Debug, Deserialize)]
pub struct EditEnrollmentRequest {
    pub monitor: Option<bool>,
    pub fee_exempt: Option<bool>,
}

/// PUT `/api/classes/{class_id}/students/{user_id}`
///
/// Toggle a student's monitor or fee-exemption flags. Staff only (router
/// layer).
pub async fn edit_enrollment(
    State(state): State<AppState>,
    Path((class_id, user_id)): Path<(i64, i64)>,
    Json(req): Json<EditEnrollmentRequest>,
) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
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

    let mut active = enrollment.into_active_model();
    if let Some(monitor) = req.monitor {
        active.monitor = Set(monitor);
    }
    if let Some(fee_exempt) = req.fee_exempt {
        active.fee_exempt = Set(fee_exempt);
    }

    match active.update(db).await {
        Ok(enrollment) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                serde_json::json!({
                    "class_id": enrollment.class_id,
                    "user_id": enrollment.user_id,
                    "monitor": enrollment.monitor,
                    "fee_exempt": enrollment.fee_exempt,
                }),
                "Enrollment updated",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to update enrollment");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}
