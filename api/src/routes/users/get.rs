use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use util::state::AppState;

use super::common::UserDto;
use crate::response::ApiResponse;
use db::models::user::{Column as UserCol, Entity as UserEntity, Model as UserModel};

#[derive(serde::Deserialize)]
pub struct ListQuery {
    /// Fuzzy match on username or email.
    pub q: Option<String>,
    pub admin: Option<bool>,
    pub approved: Option<bool>,
    /// Sort by: `username` | `email` | `created_at` (prefix `-` for desc).
    pub sort: Option<String>,
    pub page: Option<i32>,
    pub per_page: Option<i32>,
}

#[derive(serde::Serialize, Default)]
pub struct ListResponse {
    pub users: Vec<UserDto>,
    pub page: i32,
    pub per_page: i32,
    pub total: i32,
}

/// GET `/api/users`
///
/// List accounts with pagination, sorting, and search. Staff only (router
/// layer).
pub async fn list_users(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> (StatusCode, Json<ApiResponse<ListResponse>>) {
    let db = state.db();
    let page = q.page.unwrap_or(1).max(1) as u64;
    let per_page = q.per_page.unwrap_or(20).clamp(1, 100) as u64;

    let mut sel = UserEntity::find();
    if let Some(s) = q.q.as_ref().filter(|s| !s.trim().is_empty()) {
        sel = sel.filter(
            Condition::any()
                .add(UserCol::Username.contains(s))
                .add(UserCol::Email.contains(s)),
        );
    }
    if let Some(admin) = q.admin {
        sel = sel.filter(UserCol::Admin.eq(admin));
    }
    if let Some(approved) = q.approved {
        sel = sel.filter(UserCol::Approved.eq(approved));
    }
    sel = match q.sort.as_deref() {
        Some(sort) if sort.starts_with('-') => match &sort[1..] {
            "username" => sel.order_by_desc(UserCol::Username),
            "email" => sel.order_by_desc(UserCol::Email),
            _ => sel.order_by_desc(UserCol::CreatedAt),
        },
        Some("username") => sel.order_by_asc(UserCol::Username),
        Some("email") => sel.order_by_asc(UserCol::Email),
        Some("created_at") => sel.order_by_asc(UserCol::CreatedAt),
        _ => sel.order_by_desc(UserCol::CreatedAt),
    };

    let paginator = sel.paginate(db, per_page);
    let total = paginator.num_items().await.unwrap_or(0) as i32;
    let rows = paginator
        .fetch_page(page.saturating_sub(1))
        .await
        .unwrap_or_default();

    let resp = ListResponse {
        users: rows.into_iter().map(UserDto::from).collect(),
        page: page as i32,
        per_page: per_page as i32,
        total,
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(resp, "Users retrieved")),
    )
}

/// GET `/api/users/{user_id}`
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<UserDto>>) {
    match UserModel::find_by_id(state.db(), user_id).await {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(ApiResponse::success(UserDto::from(user), "User retrieved")),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("User not found")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load user");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}
