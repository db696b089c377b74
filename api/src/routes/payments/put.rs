use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use common::format_validation_errors;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, IntoActiveModel};
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

use super::common::{PaymentDto, populate_payment};
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use db::models::payment::{Model as PaymentModel, PaymentStatus};

/// Partial update of a pending payment; omitted fields are left untouched.
#[derive(Debug, Deserialize, Validate)]
pub struct EditPaymentRequest {
    #[validate(range(min = 1, message = "Amount must be positive"))]
    pub amount: Option<i64>,

    #[validate(length(min = 1, max = 256, message = "Receipt reference cannot be empty"))]
    pub receipt_reference: Option<String>,

    pub note: Option<String>,
}

/// PUT `/api/payments/{payment_id}`
///
/// Owner-only edit of a payment request while it is still `pending`; the
/// decision state never changes here.
///
/// ### Responses
/// - `200 OK` with the populated payment
/// - `403 Forbidden` (caller does not own the payment)
/// - `404 Not Found` (unknown payment)
/// - `409 Conflict` (payment already decided)
pub async fn edit_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<EditPaymentRequest>,
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

    let payment = match PaymentModel::find_by_id(db, payment_id).await {
        Ok(Some(payment)) => payment,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Payment not found")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load payment");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

    if payment.student_id != claims.sub {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("You do not own this payment request")),
        );
    }

    if payment.status != PaymentStatus::Pending {
        return (
            StatusCode::CONFLICT,
            Json(ApiResponse::error(
                "Only pending payment requests can be edited",
            )),
        );
    }

    let mut active = payment.into_active_model();
    if let Some(amount) = req.amount {
        active.amount = Set(amount);
    }
    if let Some(receipt_reference) = req.receipt_reference {
        active.receipt_reference = Set(receipt_reference);
    }
    if let Some(note) = req.note {
        active.note = Set(Some(note));
    }
    active.updated_at = Set(chrono::Utc::now());

    let payment = match active.update(db).await {
        Ok(payment) => payment,
        Err(e) => {
            tracing::error!(error = %e, "Failed to update payment");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

    match populate_payment(db, payment).await {
        Ok(dto) => (
            StatusCode::OK,
            Json(ApiResponse::success(Some(dto), "Payment request updated")),
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
