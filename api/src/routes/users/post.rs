use axum::{Json, extract::State, http::StatusCode};
use common::format_validation_errors;
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

use super::common::UserDto;
use crate::response::ApiResponse;
use db::models::user::Model as UserModel;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 32, message = "Username must be 3-32 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[serde(default)]
    pub admin: bool,
}

/// POST `/api/users`
///
/// Staff-created accounts are approved immediately.
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> (StatusCode, Json<ApiResponse<UserDto>>) {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    let db = state.db();

    match UserModel::exists(db, &req.username, &req.email).await {
        Ok(true) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::error(
                    "A user with this username or email already exists",
                )),
            );
        }
        Ok(false) => {}
        Err(e) => {
            tracing::error!(error = %e, "Failed to check existing users");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    }

    match UserModel::create(db, &req.username, &req.email, &req.password, req.admin, true).await {
        Ok(user) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(UserDto::from(user), "User created")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create user");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}
