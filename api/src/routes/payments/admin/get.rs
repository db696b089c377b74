use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{Datelike, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use std::collections::HashMap;
use util::state::AppState;

use super::super::common::{ClassRef, PaymentDto, StudentRef, populate_payments};
use crate::response::ApiResponse;
use db::models::attendance_sheet::Model as SheetModel;
use db::models::payment::{Model as PaymentModel, PaymentStatus};
use db::models::{
    class::Model as ClassModel,
    class_enrollment::{Column as EnrollmentCol, Entity as EnrollmentEntity},
    user::{Column as UserCol, Entity as UserEntity},
};
use db::payment_status::month_status;

/// One enrolled student's derived status for the requested month.
#[derive(serde::Serialize)]
pub struct StudentMonthDto {
    pub student: StudentRef,
    pub monitor: bool,
    pub fee_exempt: bool,
    pub attendance: db::models::attendance_sheet::MonthAttendance,
    pub requires_payment: bool,
    pub overdue: bool,
    pub payment: Option<PaymentDto>,
}

#[derive(serde::Serialize, Default)]
pub struct MonthViewResponse {
    pub class: Option<ClassRef>,
    pub year: i32,
    pub month: i32,
    pub students: Vec<StudentMonthDto>,
    pub pending_requests: Vec<PaymentDto>,
}

/// GET `/api/payments/admin/{class_id}/{year}/{month}`
///
/// Per-student derived status for one month of one class, plus the month's
/// pending payment requests. Staff only (router layer).
pub async fn month_view(
    State(state): State<AppState>,
    Path((class_id, year, month)): Path<(i64, i32, i32)>,
) -> (StatusCode, Json<ApiResponse<MonthViewResponse>>) {
    if !(1..=12).contains(&month) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Month must be between 1 and 12")),
        );
    }

    let db = state.db();

    let class = match ClassModel::find_by_id(db, class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Class not found")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load class");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

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

    let student_ids: Vec<i64> = enrollments.iter().map(|e| e.user_id).collect();
    let mut user_map = HashMap::<i64, StudentRef>::new();
    if !student_ids.is_empty() {
        let users = UserEntity::find()
            .filter(UserCol::Id.is_in(student_ids))
            .all(db)
            .await
            .unwrap_or_default();
        for u in users {
            user_map.insert(
                u.id,
                StudentRef {
                    id: u.id,
                    username: u.username,
                    email: u.email,
                },
            );
        }
    }

    let month_payments = match PaymentModel::find_for_class_month(db, class_id, year, month).await
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(error = %e, "Failed to list payments");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

    let pending: Vec<PaymentModel> = month_payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Pending)
        .cloned()
        .collect();

    let mut payment_by_student: HashMap<i64, PaymentModel> = month_payments
        .into_iter()
        .map(|p| (p.student_id, p))
        .collect();

    let now = Utc::now();
    let today = (now.year(), now.month());

    let mut students = Vec::with_capacity(enrollments.len());
    for enrollment in enrollments {
        let Some(student) = user_map.get(&enrollment.user_id).cloned() else {
            continue;
        };

        let attendance = match SheetModel::month_attendance(
            db,
            class_id,
            enrollment.user_id,
            year,
            month as u32,
        )
        .await
        {
            Ok(attendance) => attendance,
            Err(e) => {
                tracing::error!(error = %e, "Failed to aggregate attendance");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::error("Failed to aggregate attendance")),
                );
            }
        };

        let payment = payment_by_student.remove(&enrollment.user_id);
        let free_class = class.free_class || enrollment.fee_exempt;
        let status = month_status(
            year,
            month as u32,
            attendance,
            free_class,
            class.monthly_fee,
            payment,
            today,
        );

        let payment_dto = match status.payment {
            Some(p) => match populate_payments(db, vec![p]).await {
                Ok(mut dtos) => dtos.pop(),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to populate payment");
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ApiResponse::error("Database error")),
                    );
                }
            },
            None => None,
        };

        students.push(StudentMonthDto {
            student,
            monitor: enrollment.monitor,
            fee_exempt: enrollment.fee_exempt,
            attendance: status.attendance,
            requires_payment: status.requires_payment,
            overdue: status.overdue,
            payment: payment_dto,
        });
    }

    let pending_requests = match populate_payments(db, pending).await {
        Ok(dtos) => dtos,
        Err(e) => {
            tracing::error!(error = %e, "Failed to populate pending requests");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            MonthViewResponse {
                class: Some(ClassRef {
                    id: class.id,
                    name: class.name,
                    grade: class.grade,
                }),
                year,
                month,
                students,
                pending_requests,
            },
            "Monthly payment overview retrieved",
        )),
    )
}
