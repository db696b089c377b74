use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use util::state::AppState;

use super::common::ClassRef;
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use db::models::{class::Model as ClassModel, class_enrollment::Model as EnrollmentModel};
use db::payment_status::{self, MonthStatus};

#[derive(serde::Serialize, Default)]
pub struct YearViewResponse {
    pub class: Option<ClassRef>,
    pub year: i32,
    pub months: Vec<MonthStatus>,
}

/// GET `/api/payments/student/{class_id}/{year}`
///
/// The caller's 12-month derived payment status for one class: attendance
/// counts, fee liability and overdue flags, plus any submitted payment per
/// month. Everything except the payment rows is recomputed on each call.
///
/// ### Responses
/// - `200 OK` with 12 month entries
/// - `403 Forbidden` (caller not enrolled in the class)
/// - `404 Not Found` (unknown class)
pub async fn student_year_view(
    State(state): State<AppState>,
    Path((class_id, year)): Path<(i64, i32)>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> (StatusCode, Json<ApiResponse<YearViewResponse>>) {
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

    match EnrollmentModel::is_enrolled(db, class_id, claims.sub).await {
        Ok(true) => {}
        Ok(false) => {
            return (
                StatusCode::FORBIDDEN,
                Json(ApiResponse::error("Not enrolled in this class")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to check enrollment");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    }

    match payment_status::year_statuses(db, &class, claims.sub, year).await {
        Ok(months) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                YearViewResponse {
                    class: Some(ClassRef {
                        id: class.id,
                        name: class.name,
                        grade: class.grade,
                    }),
                    year,
                    months,
                },
                "Payment status retrieved",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to derive payment status");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to derive payment status")),
            )
        }
    }
}
