use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sea_orm::{ColumnTrait, EntityTrait, ModelTrait, QueryFilter};
use util::state::AppState;

use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use db::models::announcement::{Column as AnnouncementCol, Entity as AnnouncementEntity};

/// DELETE `/api/classes/{class_id}/announcements/{announcement_id}`
///
/// Remove an announcement. Staff only (router layer).
pub async fn delete_announcement(
    State(state): State<AppState>,
    Path((class_id, announcement_id)): Path<(i64, i64)>,
) -> (StatusCode, Json<ApiResponse<Empty>>) {
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

    match announcement.delete(db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty {}, "Announcement deleted")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete announcement");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}
