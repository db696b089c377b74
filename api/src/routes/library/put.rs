use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use common::format_validation_errors;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter};
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

use super::common::valid_category;
use crate::response::ApiResponse;
use db::models::{
    library_file::{Column as FileCol, Entity as FileEntity, Model as FileModel},
    library_folder::{Entity as FolderEntity, Model as FolderModel},
};

#[derive(Debug, Deserialize, Validate)]
pub struct EditFolderRequest {
    #[validate(length(min = 1, max = 128, message = "Folder name is required"))]
    pub name: String,
}

/// PUT `/api/library/{category}/folders/{folder_id}`
///
/// Rename a folder. Staff only (router layer).
pub async fn edit_folder(
    State(state): State<AppState>,
    Path((category, folder_id)): Path<(String, i64)>,
    Json(req): Json<EditFolderRequest>,
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

    let mut active = folder.into_active_model();
    active.name = Set(req.name);
    active.updated_at = Set(chrono::Utc::now());

    match active.update(db).await {
        Ok(folder) => (
            StatusCode::OK,
            Json(ApiResponse::success(Some(folder), "Folder updated")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to update folder");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct EditFileRequest {
    #[validate(length(min = 1, max = 256, message = "File title is required"))]
    pub title: String,

    #[validate(length(min = 1, max = 1024, message = "File URL is required"))]
    pub file_url: String,
}

/// Loads a file only when its folder belongs to the category in the path.
pub(super) async fn find_file_in_category(
    db: &sea_orm::DatabaseConnection,
    category: &str,
    file_id: i64,
) -> Result<Option<FileModel>, sea_orm::DbErr> {
    let Some(file) = FileEntity::find()
        .filter(FileCol::Id.eq(file_id))
        .one(db)
        .await?
    else {
        return Ok(None);
    };
    let folder = FolderEntity::find_by_id(file.folder_id).one(db).await?;
    Ok(folder
        .filter(|f| f.category == category)
        .map(|_| file))
}

/// PUT `/api/library/{category}/files/{file_id}`
///
/// Edit a file entry. Staff only (router layer).
pub async fn edit_file(
    State(state): State<AppState>,
    Path((category, file_id)): Path<(String, i64)>,
    Json(req): Json<EditFileRequest>,
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

    let mut active = file.into_active_model();
    active.title = Set(req.title);
    active.file_url = Set(req.file_url);
    active.updated_at = Set(chrono::Utc::now());

    match active.update(db).await {
        Ok(file) => (
            StatusCode::OK,
            Json(ApiResponse::success(Some(file), "File updated")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to update file");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}
