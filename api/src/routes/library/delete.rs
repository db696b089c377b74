use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sea_orm::ModelTrait;
use util::state::AppState;

use super::common::valid_category;
use super::put::find_file_in_category;
use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use db::models::library_folder::Model as FolderModel;

/// DELETE `/api/library/{category}/folders/{folder_id}`
///
/// Remove a folder; nested folders and files cascade at the schema level.
/// Staff only (router layer).
pub async fn delete_folder(
    State(state): State<AppState>,
    Path((category, folder_id)): Path<(String, i64)>,
) -> (StatusCode, Json<ApiResponse<Empty>>) {
    if !valid_category(&category) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Invalid category")),
        );
    }

    let db = state.db();

    let folder = match FolderModel::find_in_category(db, &category, folder_id).await {
        Ok(Some(folder)) => folder,
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
    };

    match folder.delete(db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty {}, "Folder deleted")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete folder");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}

/// DELETE `/api/library/{category}/files/{file_id}`
///
/// Remove a file entry. Staff only (router layer).
pub async fn delete_file(
    State(state): State<AppState>,
    Path((category, file_id)): Path<(String, i64)>,
) -> (StatusCode, Json<ApiResponse<Empty>>) {
    if !valid_category(&category) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Invalid category")),
        );
    }

    let db = state.db();

    let file = match find_file_in_category(db, &category, file_id).await {
        Ok(Some(file)) => file,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("File not found")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load file");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

    match file.delete(db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty {}, "File deleted")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete file");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}
