use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use db::models::user::Model as UserModel;

#[derive(Debug, Serialize, Default)]
pub struct ProfileResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub admin: bool,
    pub approved: bool,
    pub created_at: String,
}

/// GET /api/auth/me
///
/// Returns the authenticated caller's profile.
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> (StatusCode, Json<ApiResponse<ProfileResponse>>) {
    match UserModel::find_by_id(state.db(), user.0.sub).await {
        Ok(Some(profile)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ProfileResponse {
                    id: profile.id,
                    username: profile.username,
                    email: profile.email,
                    admin: profile.admin,
                    approved: profile.approved,
                    created_at: profile.created_at.to_rfc3339(),
                },
                "Profile retrieved",
            )),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("User not found")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load profile");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}
