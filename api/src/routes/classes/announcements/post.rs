use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use util::state::AppState;

use super::common::AnnouncementRequest;
use crate::{auth::AuthUser, response::ApiResponse};
use db::models::announcement::Model as AnnouncementModel;

/// POST `/api/classes/{class_id}/announcements`
///
/// Publish an announcement to a class. Staff only (router layer).
pub async fn create_announcement(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<AnnouncementRequest>,
) -> (StatusCode, Json<ApiResponse<Option<AnnouncementModel>>>) {
    match AnnouncementModel::create(state.db(), class_id, claims.sub, &req.title, &req.body, req.pinned)
        .await
    {
        Ok(announcement) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                Some(announcement),
                "Announcement created",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create announcement");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}
