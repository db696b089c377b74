use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use util::state::AppState;

use super::common::valid_category;
use crate::response::ApiResponse;
use db::models::{
    library_file::{Column as FileCol, Entity as FileEntity, Model as FileModel},
    library_folder::{Column as FolderCol, Entity as FolderEntity, Model as FolderModel},
};

#[derive(serde::Deserialize)]
pub struct FolderListQuery {
    /// When absent, lists the category's top-level folders.
    pub parent_id: Option<i64>,
}

/// GET `/api/library/{category}/folders`
///
/// List folders in a category, one nesting level at a time.
pub async fn list_folders(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(q): Query<FolderListQuery>,
) -> (StatusCode, Json<ApiResponse<Vec<FolderModel>>>) {
    if !valid_category(&category) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Invalid category")),
        );
    }

    let mut sel = FolderEntity::find().filter(FolderCol::Category.eq(category.as_str()));
    sel = match q.parent_id {
        Some(parent_id) => sel.filter(FolderCol::ParentId.eq(parent_id)),
        None => sel.filter(FolderCol::ParentId.is_null()),
    };

    match sel.order_by_asc(FolderCol::Name).all(state.db()).await {
        Ok(folders) => (
            StatusCode::OK,
            Json(ApiResponse::success(folders, "Folders retrieved")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list folders");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}

/// GET `/api/library/{category}/folders/{folder_id}/files`
pub async fn list_files(
    State(state): State<AppState>,
    Path((category, folder_id)): Path<(String, i64)>,
) -> (StatusCode, Json<ApiResponse<Vec<FileModel>>>) {
    if !valid_category(&category) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Invalid category")),
        );
    }

    let db = state.db();

    match FolderModel::find_in_category(db, &category, folder_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Folder not found")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load folder");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    }

    match FileEntity::find()
        .filter(FileCol::FolderId.eq(folder_id))
        .order_by_asc(FileCol::Title)
        .all(db)
        .await
    {
        Ok(files) => (
            StatusCode::OK,
            Json(ApiResponse::success(files, "Files retrieved")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list files");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}
