use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use util::state::AppState;

use crate::response::ApiResponse;
use db::models::announcement::{Column as AnnouncementCol, Entity as AnnouncementEntity, Model as AnnouncementModel};

#[derive(serde::Deserialize)]
pub struct ListQuery {
    pub page: Option<i32>,
    pub per_page: Option<i32>,
}

#[derive(serde::Serialize, Default)]
pub struct ListResponse {
    pub announcements: Vec<AnnouncementModel>,
    pub page: i32,
    pub per_page: i32,
    pub total: i32,
}

/// GET `/api/classes/{class_id}/announcements`
///
/// List a class's announcements, pinned first, then newest first.
pub async fn list_announcements(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
    Query(q): Query<ListQuery>,
) -> (StatusCode, Json<ApiResponse<ListResponse>>) {
    let db = state.db();
    let page = q.page.unwrap_or(1).max(1) as u64;
    let per_page = q.per_page.unwrap_or(20).clamp(1, 100) as u64;

    let sel = AnnouncementEntity::find()
        .filter(AnnouncementCol::ClassId.eq(class_id))
        .order_by_desc(AnnouncementCol::Pinned)
        .order_by_desc(AnnouncementCol::CreatedAt);

    let paginator = sel.paginate(db, per_page);
    let total = paginator.num_items().await.unwrap_or(0) as i32;
    let rows = paginator
        .fetch_page(page.saturating_sub(1))
        .await
        .unwrap_or_default();

    let resp = ListResponse {
        announcements: rows,
        page: page as i32,
        per_page: per_page as i32,
        total,
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(resp, "Announcements retrieved")),
    )
}
