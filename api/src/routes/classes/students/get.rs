use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use std::collections::HashMap;
use util::state::AppState;

use crate::response::ApiResponse;
use db::models::{
    class_enrollment::{Column as EnrollmentCol, Entity as EnrollmentEntity},
    user::{Column as UserCol, Entity as UserEntity},
};

/// One enrolled student with their per-class flags.
#[derive(serde::Serialize)]
pub struct EnrolledStudentDto {
    pub user_id: i64,
    pub username: Option<String>,
    pub email: Option<String>,
    pub monitor: bool,
    pub fee_exempt: bool,
    pub enrolled_at: String,
}

/// GET `/api/classes/{class_id}/students`
///
/// List the class roster with monitor/fee-exempt flags. Staff only (router
/// layer).
pub async fn list_students(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<Vec<EnrolledStudentDto>>>) {
    let db = state.db();

    let enrollments = match EnrollmentEntity::find()
        .filter(EnrollmentCol::ClassId.eq(class_id))
        .all(db)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(error = %e, "Failed to list enrollments");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

    let user_ids: Vec<i64> = enrollments.iter().map(|e| e.user_id).collect();
    let mut user_map = HashMap::<i64, (String, String)>::new();
    if !user_ids.is_empty() {
        let users = UserEntity::find()
            .filter(UserCol::Id.is_in(user_ids))
            .all(db)
            .await
            .unwrap_or_default();
        for u in users {
            user_map.insert(u.id, (u.username, u.email));
        }
    }

    let students = enrollments
        .into_iter()
        .map(|e| {
            let user = user_map.get(&e.user_id);
            EnrolledStudentDto {
                user_id: e.user_id,
                username: user.map(|(username, _)| username.clone()),
                email: user.map(|(_, email)| email.clone()),
                monitor: e.monitor,
                fee_exempt: e.fee_exempt,
                enrolled_at: e.created_at.to_rfc3339(),
            }
        })
        .collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(students, "Class roster retrieved")),
    )
}
