use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sea_orm::{ColumnTrait, EntityTrait, ModelTrait, QueryFilter};
use util::state::AppState;

use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use db::models::attendance_sheet::{Column as SheetCol, Entity as SheetEntity};

/// DELETE `/api/classes/{class_id}/attendance/sheets/{sheet_id}`
///
/// Remove a sheet and its entries. Staff only (router layer).
pub async fn delete_sheet(
    State(state): State<AppState>,
    Path((class_id, sheet_id)): Path<(i64, i64)>,
) -> (StatusCode, Json<ApiResponse<Empty>>) {
    let db = state.db();

    let sheet = match SheetEntity::find()
        .filter(SheetCol::Id.eq(sheet_id))
        .filter(SheetCol::ClassId.eq(class_id))
        .one(db)
        .await
    {
        Ok(Some(sheet)) => sheet,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Attendance sheet not found")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load attendance sheet");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

    match sheet.delete(db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty {}, "Attendance sheet deleted")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete attendance sheet");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}
