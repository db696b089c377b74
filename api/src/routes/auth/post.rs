use axum::{Json, extract::State, http::StatusCode};
use common::format_validation_errors;
use serde::{Deserialize, Serialize};
use util::{config, state::AppState};
use validator::Validate;

use crate::auth::generate_jwt;
use crate::response::ApiResponse;
use crate::services::email::EmailService;
use db::models::password_reset_token::Model as ResetTokenModel;
use db::models::user::Model as UserModel;

lazy_static::lazy_static! {
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new("^[a-zA-Z0-9_.-]{3,32}$").unwrap();
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(regex(
        path = *USERNAME_REGEX,
        message = "Username must be 3-32 characters (letters, digits, '_', '.', '-')"
    ))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub admin: bool,
    pub approved: bool,
}

/// POST /api/auth/register
///
/// Register a new student account. Accounts start unapproved and must be
/// approved by staff before login is possible.
///
/// ### Responses
/// - `201 Created` with the created account
/// - `400 Bad Request` (validation failure)
/// - `409 Conflict` (duplicate username or email)
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> (StatusCode, Json<ApiResponse<UserResponse>>) {
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

    match UserModel::create(db, &req.username, &req.email, &req.password, false, false).await {
        Ok(user) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                UserResponse {
                    id: user.id,
                    username: user.username,
                    email: user.email,
                    admin: user.admin,
                    approved: user.approved,
                },
                "Account registered; awaiting staff approval",
            )),
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

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username or email is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct LoginResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub admin: bool,
    pub token: String,
    pub expires_at: String,
}

/// POST /api/auth/login
///
/// Authenticate with username (or email) and password.
///
/// ### Responses
/// - `200 OK` with a bearer token and its expiry
/// - `401 Unauthorized` (unknown account or wrong password)
/// - `403 Forbidden` (account not yet approved)
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> (StatusCode, Json<ApiResponse<LoginResponse>>) {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    let db = state.db();

    let user = match UserModel::find_by_username_or_email(db, &req.username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Invalid username or password")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to look up user");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

    if !user.verify_password(&req.password) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Invalid username or password")),
        );
    }

    if !user.approved {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Account pending staff approval")),
        );
    }

    let (token, expires_at) = generate_jwt(user.id, user.admin);

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            LoginResponse {
                id: user.id,
                username: user.username,
                email: user.email,
                admin: user.admin,
                token,
                expires_at,
            },
            "Login successful",
        )),
    )
}

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

#[derive(Debug, Serialize, Default)]
pub struct Empty {}

/// POST /api/auth/forgot-password
///
/// Issues a reset token and emails a reset link. Always answers `200` for
/// unknown addresses so the endpoint cannot be used to probe which emails
/// exist; issuance is rate-limited per account per hour.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> (StatusCode, Json<ApiResponse<Empty>>) {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    let db = state.db();
    let accepted = (
        StatusCode::OK,
        Json(ApiResponse::success(
            Empty {},
            "If the address is registered, a reset email has been sent",
        )),
    );

    let user = match UserModel::find_by_email(db, &req.email).await {
        Ok(Some(user)) => user,
        Ok(None) => return accepted,
        Err(e) => {
            tracing::error!(error = %e, "Failed to look up user for reset");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

    match ResetTokenModel::issued_in_last_hour(db, user.id).await {
        Ok(count) if count >= config::max_password_reset_requests_per_hour() as u64 => {
            return (
                StatusCode::TOO_MANY_REQUESTS,
                Json(ApiResponse::error(
                    "Too many reset requests; try again later",
                )),
            );
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!(error = %e, "Failed to count reset tokens");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    }

    let token = match ResetTokenModel::create(db, user.id, config::reset_token_expiry_minutes())
        .await
    {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create reset token");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

    match state.mailer() {
        Some(mailer) => {
            if let Err(e) =
                EmailService::send_password_reset_email(mailer, &user.email, &token.token).await
            {
                tracing::error!(error = %e, "Failed to send reset email");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::error("Failed to send reset email")),
                );
            }
        }
        None => {
            tracing::warn!(user_id = user.id, "SMTP not configured; reset email skipped");
        }
    }

    accepted
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Reset token is required"))]
    pub token: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// POST /api/auth/reset-password
///
/// Consumes a valid reset token and replaces the account password.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> (StatusCode, Json<ApiResponse<Empty>>) {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    let db = state.db();

    let token = match ResetTokenModel::find_valid(db, &req.token).await {
        Ok(Some(token)) => token,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("Invalid or expired reset token")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to look up reset token");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

    let result: Result<(), sea_orm::DbErr> = async {
        use sea_orm::{ActiveModelTrait, ActiveValue::Set, IntoActiveModel};

        let user = UserModel::find_by_id(db, token.user_id)
            .await?
            .ok_or_else(|| sea_orm::DbErr::RecordNotFound("user".into()))?;

        let mut active = user.into_active_model();
        active.password_hash = Set(UserModel::hash_password(&req.password)?);
        active.updated_at = Set(chrono::Utc::now());
        active.update(db).await?;

        token.mark_used(db).await?;
        Ok(())
    }
    .await;

    match result {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty {}, "Password updated")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to reset password");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}
