use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use util::state::AppState;

use super::common::AnnouncementRequest;
use crate::response::ApiResponse;
use db::models::announcement::{
    Column as AnnouncementCol, Entity as AnnouncementEntity, Model as AnnouncementModel,
};

/// PUT `/api/classes/{class_id}/announcements/{announcement_id}`
///
/// Edit an announcement. Staff only (router layer).
pub async fn edit_announcement(
    State(state): State<AppState>,
    Path((class_id, announcement_id)): Path<(i64, i64)>,
    Json(req): Json<AnnouncementRequest>,
) -> (StatusCode, Json<ApiResponse<Option<AnnouncementModel>>>) {
    let db = state.db();

    let announcement = match AnnouncementEntity::find()
        .filter(AnnouncementCol::Id.eq(announcement_id))
        .filter(AnnouncementCol::ClassId.eq(class_id))
        .one(db)
        .await
    {
        Ok(Some(announcement)) => announcement,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Announcement not found")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load announcement");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

    match announcement.edit(db, &req.title, &req.body, req.pinned).await {
        Ok(announcement) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(announcement),
                "Announcement updated",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to update announcement");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}
