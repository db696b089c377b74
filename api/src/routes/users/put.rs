use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, IntoActiveModel};
use serde::Deserialize;
use util::state::AppState;

use super::common::UserDto;
use crate::response::ApiResponse;
use db::models::user::Model as UserModel;

/// Partial update; omitted fields are left untouched.
#[derive(Debug, Deserialize)]
pub struct EditUserRequest {
    pub email: Option<String>,
    pub admin: Option<bool>,
    pub approved: Option<bool>,
    pub password: Option<String>,
}

/// PUT `/api/users/{user_id}`
///
/// Staff edit of an account; the usual path for approving a registration is
/// `{"approved": true}`.
pub async fn edit_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<EditUserRequest>,
) -> (StatusCode, Json<ApiResponse<UserDto>>) {
    let db = state.db();

    let user = match UserModel::find_by_id(db, user_id).await {
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

    if let Some(password) = req.password.as_deref() {
        if password.len() < 8 {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("Password must be at least 8 characters")),
            );
        }
    }

    let mut active = user.into_active_model();
    if let Some(email) = req.email {
        active.email = Set(email);
    }
    if let Some(admin) = req.admin {
        active.admin = Set(admin);
    }
    if let Some(approved) = req.approved {
        active.approved = Set(approved);
    }
    if let Some(password) = req.password.as_deref() {
        match UserModel::hash_password(password) {
            Ok(hash) => active.password_hash = Set(hash),
            Err(e) => {
                tracing::error!(error = %e, "Failed to hash password");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::error("Failed to update password")),
                );
            }
        }
    }
    active.updated_at = Set(chrono::Utc::now());

    match active.update(db).await {
        Ok(user) => (
            StatusCode::OK,
            Json(ApiResponse::success(UserDto::from(user), "User updated")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to update user");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}
