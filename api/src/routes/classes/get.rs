use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use util::state::AppState;

use super::common::ClassDto;
use crate::response::ApiResponse;
use db::models::class::{Column as ClassCol, Entity as ClassEntity, Model as ClassModel};

#[derive(serde::Deserialize)]
pub struct ListQuery {
    /// Fuzzy match on class name.
    pub q: Option<String>,
    pub grade: Option<String>,
    pub category: Option<String>,
    /// Sort by: `name` | `grade` | `created_at` (prefix `-` for desc).
    pub sort: Option<String>,
    pub page: Option<i32>,
    pub per_page: Option<i32>,
}

#[derive(serde::Serialize, Default)]
pub struct ListResponse {
    pub classes: Vec<ClassDto>,
    pub page: i32,
    pub per_page: i32,
    pub total: i32,
}

/// GET `/api/classes`
///
/// List classes with pagination, sorting, and search.
pub async fn list_classes(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> (StatusCode, Json<ApiResponse<ListResponse>>) {
    let db = state.db();
    let page = q.page.unwrap_or(1).max(1) as u64;
    let per_page = q.per_page.unwrap_or(20).clamp(1, 100) as u64;

    let mut sel = ClassEntity::find();
    if let Some(s) = q.q.as_ref().filter(|s| !s.trim().is_empty()) {
        sel = sel.filter(ClassCol::Name.contains(s));
    }
    if let Some(grade) = q.grade.as_ref() {
        sel = sel.filter(ClassCol::Grade.eq(grade));
    }
    if let Some(category) = q.category.as_ref() {
        sel = sel.filter(ClassCol::Category.eq(category));
    }
    sel = match q.sort.as_deref() {
        Some(sort) if sort.starts_with('-') => match &sort[1..] {
            "name" => sel.order_by_desc(ClassCol::Name),
            "grade" => sel.order_by_desc(ClassCol::Grade),
            _ => sel.order_by_desc(ClassCol::CreatedAt),
        },
        Some("name") => sel.order_by_asc(ClassCol::Name),
        Some("grade") => sel.order_by_asc(ClassCol::Grade),
        Some("created_at") => sel.order_by_asc(ClassCol::CreatedAt),
        _ => sel.order_by_desc(ClassCol::CreatedAt),
    };

    let paginator = sel.paginate(db, per_page);
    let total = paginator.num_items().await.unwrap_or(0) as i32;
    let rows = paginator
        .fetch_page(page.saturating_sub(1))
        .await
        .unwrap_or_default();

    let resp = ListResponse {
        classes: rows.into_iter().map(ClassDto::from).collect(),
        page: page as i32,
        per_page: per_page as i32,
        total,
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(resp, "Classes retrieved")),
    )
}

/// GET `/api/classes/{class_id}`
pub async fn get_class(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<ClassDto>>) {
    match ClassModel::find_by_id(state.db(), class_id).await {
        Ok(Some(class)) => (
            StatusCode::OK,
            Json(ApiResponse::success(ClassDto::from(class), "Class retrieved")),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Class not found")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load class");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}
