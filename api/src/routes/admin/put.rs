use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::str::FromStr;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::payments::common::{PaymentDto, populate_payment};
use db::models::payment::{Model as PaymentModel, PaymentStatus};

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    /// Target status; both historical spellings ("Approved"/"approved") are
    /// accepted, and `pending` is allowed here to park a request back in the
    /// queue.
    pub status: String,
    pub note: Option<String>,
}

/// PUT `/api/admin/payment-requests/{payment_id}/status`
///
/// Direct status update on one payment request. Shares the payment state
/// machine with the process endpoint; unlike it, this one may also set
/// `pending`. Staff only (router layer).
pub async fn update_payment_status(
    State(state): State<AppState>,
    Path(payment_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<StatusRequest>,
) -> (StatusCode, Json<ApiResponse<Option<PaymentDto>>>) {
    let status = match PaymentStatus::from_str(&req.status) {
        Ok(status) => status,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!(
                    "Unknown status '{}'",
                    req.status
                ))),
            );
        }
    };

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

    let payment = match payment
        .process(db, status, claims.sub, req.note.as_deref())
        .await
    {
        Ok(payment) => payment,
        Err(e) => {
            tracing::error!(error = %e, "Failed to update payment status");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

    match populate_payment(db, payment).await {
        Ok(dto) => (
            StatusCode::OK,
            Json(ApiResponse::success(Some(dto), "Payment status updated")),
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
