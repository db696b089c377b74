use axum::{Extension, Json, extract::State, http::StatusCode};
use common::format_validation_errors;
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

use super::common::{PaymentDto, populate_payment};
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use db::models::{
    attendance_sheet::Model as SheetModel,
    class::Model as ClassModel,
    class_enrollment::Model as EnrollmentModel,
    payment::{Model as PaymentModel, SubmitError},
};

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitPaymentRequest {
    pub class_id: i64,

    #[validate(range(min = 2000, max = 2100, message = "Year is out of range"))]
    pub year: i32,

    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub month: i32,

    #[validate(range(min = 1, message = "Amount must be positive"))]
    pub amount: i64,

    #[validate(length(min = 1, max = 256, message = "Receipt reference is required"))]
    pub receipt_reference: String,

    pub note: Option<String>,
}

/// POST `/api/payments/submit`
///
/// Submit a monthly fee payment request. The caller's attendance for the
/// month is snapshotted onto the request at this moment; the request starts
/// `pending`.
///
/// ### Responses
/// - `201 Created` with the populated payment
/// - `400 Bad Request` (validation failure, or a payment already exists for
///   this month — the unique index makes this hold under races too)
/// - `403 Forbidden` (caller not enrolled in the class)
/// - `404 Not Found` (unknown class)
pub async fn submit_payment(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<SubmitPaymentRequest>,
) -> (StatusCode, Json<ApiResponse<Option<PaymentDto>>>) {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    let db = state.db();

    match ClassModel::find_by_id(db, req.class_id).await {
        Ok(Some(_)) => {}
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
    }

    match EnrollmentModel::is_enrolled(db, req.class_id, claims.sub).await {
        Ok(true) => {}
        Ok(false) => {
            return (
                StatusCode::FORBIDDEN,
                Json(ApiResponse::error("Not enrolled in this class")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to check enrollment");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    }

    let attendance = match SheetModel::month_attendance(
        db,
        req.class_id,
        claims.sub,
        req.year,
        req.month as u32,
    )
    .await
    {
        Ok(attendance) => attendance,
        Err(e) => {
            tracing::error!(error = %e, "Failed to snapshot attendance");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to snapshot attendance")),
            );
        }
    };

    let payment = match PaymentModel::submit(
        db,
        claims.sub,
        req.class_id,
        req.year,
        req.month,
        req.amount,
        &req.receipt_reference,
        req.note.as_deref(),
        attendance,
    )
    .await
    {
        Ok(payment) => payment,
        Err(SubmitError::AlreadyExists) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(
                    "A payment for this month already exists",
                )),
            );
        }
        Err(SubmitError::Db(e)) => {
            tracing::error!(error = %e, "Failed to create payment");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

    match populate_payment(db, payment).await {
        Ok(dto) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(Some(dto), "Payment request submitted")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to populate payment");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}
