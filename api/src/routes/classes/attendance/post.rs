use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use util::state::AppState;

use super::common::{SheetDto, SheetRequest};
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use db::models::{attendance_sheet::Model as SheetModel, class::Model as ClassModel};

/// POST `/api/classes/{class_id}/attendance/sheets`
///
/// Open an attendance sheet for a class session. Staff or a monitor of the
/// class (router layer).
///
/// ### Responses
/// - `201 Created` with the sheet
/// - `404 Not Found` (unknown class)
/// - `409 Conflict` (a sheet already exists for that calendar day)
pub async fn create_sheet(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<SheetRequest>,
) -> (StatusCode, Json<ApiResponse<SheetDto>>) {
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

    match SheetModel::find_for_day(db, class_id, req.session_date).await {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::error(
                    "An attendance sheet already exists for this date",
                )),
            );
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!(error = %e, "Failed to check existing sheets");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    }

    match SheetModel::create(db, class_id, claims.sub, req.session_date).await {
        Ok(sheet) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                SheetDto::from(sheet),
                "Attendance sheet created",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create attendance sheet");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}
