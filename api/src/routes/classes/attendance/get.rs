use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use std::collections::HashMap;
use util::state::AppState;

use super::common::SheetDto;
use crate::response::ApiResponse;
use db::models::{
    attendance_entry::{Column as EntryCol, Entity as EntryEntity},
    attendance_sheet::{Column as SheetCol, Entity as SheetEntity, month_bounds},
    user::{Column as UserCol, Entity as UserEntity},
};

#[derive(serde::Deserialize)]
pub struct ListQuery {
    /// Restrict to one calendar month; both must be given together.
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub page: Option<i32>,
    pub per_page: Option<i32>,
}

#[derive(serde::Serialize, Default)]
pub struct ListResponse {
    pub sheets: Vec<SheetDto>,
    pub page: i32,
    pub per_page: i32,
    pub total: i32,
}

/// GET `/api/classes/{class_id}/attendance/sheets`
///
/// List attendance sheets for a class, newest session first, optionally
/// restricted to one calendar month.
pub async fn list_sheets(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
    Query(q): Query<ListQuery>,
) -> (StatusCode, Json<ApiResponse<ListResponse>>) {
    let db = state.db();
    let page = q.page.unwrap_or(1).max(1) as u64;
    let per_page = q.per_page.unwrap_or(20).clamp(1, 100) as u64;

    let mut sel = SheetEntity::find().filter(SheetCol::ClassId.eq(class_id));
    if let (Some(year), Some(month)) = (q.year, q.month) {
        match month_bounds(year, month) {
            Some((start, end)) => {
                sel = sel.filter(SheetCol::SessionDate.between(start, end));
            }
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error("Invalid year/month filter")),
                );
            }
        }
    }
    sel = sel.order_by_desc(SheetCol::SessionDate);

    let paginator = sel.paginate(db, per_page);
    let total = paginator.num_items().await.unwrap_or(0) as i32;
    let rows = paginator
        .fetch_page(page.saturating_sub(1))
        .await
        .unwrap_or_default();

    let resp = ListResponse {
        sheets: rows.into_iter().map(SheetDto::from).collect(),
        page: page as i32,
        per_page: per_page as i32,
        total,
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(resp, "Attendance sheets retrieved")),
    )
}

/// A single entry with the student's display fields resolved.
#[derive(serde::Serialize)]
pub struct EntryDto {
    pub student_id: i64,
    pub username: Option<String>,
    pub email: Option<String>,
    pub status: db::models::attendance_entry::AttendanceStatus,
}

#[derive(serde::Serialize, Default)]
pub struct SheetDetailResponse {
    pub sheet: SheetDto,
    pub entries: Vec<EntryDto>,
}

/// GET `/api/classes/{class_id}/attendance/sheets/{sheet_id}`
///
/// Fetch one sheet with its entries populated.
pub async fn get_sheet(
    State(state): State<AppState>,
    Path((class_id, sheet_id)): Path<(i64, i64)>,
) -> (StatusCode, Json<ApiResponse<SheetDetailResponse>>) {
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

    let entries = EntryEntity::find()
        .filter(EntryCol::SheetId.eq(sheet_id))
        .all(db)
        .await
        .unwrap_or_default();

    let student_ids: Vec<i64> = entries.iter().map(|e| e.student_id).collect();
    let mut user_map = HashMap::<i64, (String, String)>::new();
    if !student_ids.is_empty() {
        let users = UserEntity::find()
            .filter(UserCol::Id.is_in(student_ids))
            .all(db)
            .await
            .unwrap_or_default();
        for u in users {
            user_map.insert(u.id, (u.username, u.email));
        }
    }

    let resp = SheetDetailResponse {
        sheet: SheetDto::from(sheet),
        entries: entries
            .into_iter()
            .map(|e| {
                let user = user_map.get(&e.student_id);
                EntryDto {
                    student_id: e.student_id,
                    username: user.map(|(username, _)| username.clone()),
                    email: user.map(|(_, email)| email.clone()),
                    status: e.status,
                }
            })
            .collect(),
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(resp, "Attendance sheet retrieved")),
    )
}
