use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use common::format_validation_errors;
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

use super::common::valid_category;
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use db::models::{
    library_file::Model as FileModel, library_folder::Model as FolderModel,
};

#[derive(Debug, Deserialize, Validate)]
pub struct FolderRequest {
    #[validate(length(min = 1, max = 128, message = "Folder name is required"))]
    pub name: String,

    pub parent_id: Option<i64>,
}

/// POST `/api/library/{category}/folders`
///
/// Create a folder, optionally nested under a parent of the same category.
/// Staff only (router layer).
pub async fn create_folder(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<FolderRequest>,
) -> (StatusCode, Json<ApiResponse<Option<FolderModel>>>) {
    if !valid_category(&category) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Invalid category")),
        );
    }
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    let db = state.db();

    // A parent must exist and share the category; nesting never crosses
    // category boundaries.
    if let Some(parent_id) = req.parent_id {
        match FolderModel::find_in_category(db, &category, parent_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return (
                    StatusCode::NOT_FOUND,
                    Json(ApiResponse::error("Parent folder not found")),
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load parent folder");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::error("Database error")),
                );
            }
        }
    }

    match FolderModel::create(db, &category, &req.name, req.parent_id, claims.sub).await {
        Ok(folder) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(Some(folder), "Folder created")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create folder");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct FileRequest {
    #[validate(length(min = 1, max = 256, message = "File title is required"))]
    pub title: String,

    #[validate(length(min = 1, max = 1024, message = "File URL is required"))]
    pub file_url: String,
}

/// POST `/api/library/{category}/folders/{folder_id}/files`
///
/// Add a file entry to a folder. Staff only (router layer).
pub async fn create_file(
    State(state): State<AppState>,
    Path((category, folder_id)): Path<(String, i64)>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<FileRequest>,
) -> (StatusCode, Json<ApiResponse<Option<FileModel>>>) {
    if !valid_category(&category) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Invalid category")),
        );
    }
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
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

    match FileModel::create(db, folder_id, &req.title, &req.file_url, claims.sub).await {
        Ok(file) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(Some(file), "File created")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create file");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}
