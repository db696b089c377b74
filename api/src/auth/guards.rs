use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, Path, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use db::models::class_enrollment::Model as EnrollmentModel;
use std::collections::HashMap;
use util::state::AppState;

// --- Role Based Access Guards ---

#[derive(serde::Serialize, Default)]
pub struct Empty;

/// Helper to extract, validate the user from request extensions and insert
/// them back into the request.
async fn extract_and_insert_authuser(
    req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), (StatusCode, Json<ApiResponse<Empty>>)> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authentication required")),
            )
        })?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

fn class_id_from_params(
    params: &HashMap<String, String>,
) -> Result<i64, (StatusCode, Json<ApiResponse<Empty>>)> {
    params
        .get("class_id")
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Missing or invalid class_id")),
        ))
}

/// Basic guard to ensure the request is authenticated.
pub async fn allow_authenticated(
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, _user) = extract_and_insert_authuser(req).await?;

    Ok(next.run(req).await)
}

/// Staff-only guard.
pub async fn allow_admin(
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if !user.0.admin {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Staff access required")),
        ));
    }

    Ok(next.run(req).await)
}

/// Allows staff, or any student enrolled in the `class_id` named by the path.
pub async fn require_enrolled(
    State(app_state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, user) = extract_and_insert_authuser(req).await?;
    let class_id = class_id_from_params(&params)?;

    if user.0.admin {
        return Ok(next.run(req).await);
    }

    match EnrollmentModel::is_enrolled(app_state.db(), class_id, user.0.sub).await {
        Ok(true) => Ok(next.run(req).await),
        Ok(false) => Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Not enrolled in this class")),
        )),
        Err(e) => {
            tracing::warn!(error = %e, class_id, user_id = user.0.sub, "DB error while checking enrollment; denying access");
            Err((
                StatusCode::FORBIDDEN,
                Json(ApiResponse::error("Not enrolled in this class")),
            ))
        }
    }
}

/// Allows staff, or a monitor of the `class_id` named by the path.
///
/// Monitors are students trusted to take attendance for their own class.
pub async fn require_staff_or_monitor(
    State(app_state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, user) = extract_and_insert_authuser(req).await?;
    let class_id = class_id_from_params(&params)?;

    if user.0.admin {
        return Ok(next.run(req).await);
    }

    match EnrollmentModel::is_monitor(app_state.db(), class_id, user.0.sub).await {
        Ok(true) => Ok(next.run(req).await),
        Ok(false) => Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Monitor or staff access required")),
        )),
        Err(e) => {
            tracing::warn!(error = %e, class_id, user_id = user.0.sub, "DB error while checking monitor role; denying access");
            Err((
                StatusCode::FORBIDDEN,
                Json(ApiResponse::error("Monitor or staff access required")),
            ))
        }
    }
}
