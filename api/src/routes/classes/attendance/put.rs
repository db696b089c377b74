use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter};
use util::state::AppState;

use super::common::{EntriesRequest, SheetDto};
use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use db::models::{
    attendance_entry::{self, Column as EntryCol, Entity as EntryEntity},
    attendance_sheet::{Column as SheetCol, Entity as SheetEntity, Model as SheetModel},
    class_enrollment::{Column as EnrollmentCol, Entity as EnrollmentEntity},
};

async fn load_sheet(
    db: &sea_orm::DatabaseConnection,
    class_id: i64,
    sheet_id: i64,
) -> Result<Option<SheetModel>, sea_orm::DbErr> {
    SheetEntity::find()
        .filter(SheetCol::Id.eq(sheet_id))
        .filter(SheetCol::ClassId.eq(class_id))
        .one(db)
        .await
}

/// PUT `/api/classes/{class_id}/attendance/sheets/{sheet_id}/entries`
///
/// Upsert the present/absent marks on a sheet. Staff or a monitor of the
/// class (router layer).
///
/// ### Responses
/// - `200 OK`
/// - `400 Bad Request` (a listed student is not enrolled in the class)
/// - `404 Not Found` (unknown sheet)
/// - `409 Conflict` (sheet already finalized)
pub async fn upsert_entries(
    State(state): State<AppState>,
    Path((class_id, sheet_id)): Path<(i64, i64)>,
    Json(req): Json<EntriesRequest>,
) -> (StatusCode, Json<ApiResponse<Empty>>) {
    let db = state.db();

    let sheet = match load_sheet(db, class_id, sheet_id).await {
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

    if sheet.finalized {
        return (
            StatusCode::CONFLICT,
            Json(ApiResponse::error("Sheet is finalized; entries are locked")),
        );
    }

    if req.entries.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("No entries supplied")),
        );
    }

    // Only enrolled students may appear on the sheet.
    let student_ids: Vec<i64> = req.entries.iter().map(|e| e.student_id).collect();
    let enrolled: std::collections::HashSet<i64> = match EnrollmentEntity::find()
        .filter(EnrollmentCol::ClassId.eq(class_id))
        .filter(EnrollmentCol::UserId.is_in(student_ids.clone()))
        .all(db)
        .await
    {
        Ok(rows) => rows.into_iter().map(|e| e.user_id).collect(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to check enrollments");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };
    if let Some(missing) = student_ids.iter().find(|id| !enrolled.contains(id)) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!(
                "Student {missing} is not enrolled in this class"
            ))),
        );
    }

    let models: Vec<attendance_entry::ActiveModel> = req
        .entries
        .iter()
        .map(|e| attendance_entry::ActiveModel {
            sheet_id: Set(sheet_id),
            student_id: Set(e.student_id),
            status: Set(e.status),
        })
        .collect();

    let insert = EntryEntity::insert_many(models)
        .on_conflict(
            OnConflict::columns([EntryCol::SheetId, EntryCol::StudentId])
                .update_column(EntryCol::Status)
                .to_owned(),
        )
        .exec(db)
        .await;

    if let Err(e) = insert {
        tracing::error!(error = %e, "Failed to upsert attendance entries");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error("Database error")),
        );
    }

    let mut active = sheet.into_active_model();
    active.updated_at = Set(chrono::Utc::now());
    if let Err(e) = active.update(db).await {
        tracing::error!(error = %e, "Failed to touch attendance sheet");
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(Empty {}, "Attendance entries saved")),
    )
}

/// PUT `/api/classes/{class_id}/attendance/sheets/{sheet_id}/finalize`
///
/// Lock a sheet's entries. Staff or a monitor of the class (router layer).
pub async fn finalize_sheet(
    State(state): State<AppState>,
    Path((class_id, sheet_id)): Path<(i64, i64)>,
) -> (StatusCode, Json<ApiResponse<SheetDto>>) {
    let db = state.db();

    let sheet = match load_sheet(db, class_id, sheet_id).await {
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

    let mut active = sheet.into_active_model();
    active.finalized = Set(true);
    active.updated_at = Set(chrono::Utc::now());

    match active.update(db).await {
        Ok(sheet) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                SheetDto::from(sheet),
                "Attendance sheet finalized",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to finalize attendance sheet");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}
