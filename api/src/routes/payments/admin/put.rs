use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::str::FromStr;
use util::state::AppState;

use super::super::common::{PaymentDto, populate_payment};
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use db::models::payment::{Model as PaymentModel, PaymentStatus};

/// Parses a decision from the wire, accepting both historical spellings
/// ("Approved" and "approved"), and rejecting `pending` — a decision can only
/// move a request to a decided state.
fn parse_decision(action: &str) -> Result<PaymentStatus, String> {
    match PaymentStatus::from_str(action) {
        Ok(PaymentStatus::Pending) => {
            Err("Action must be 'approved' or 'rejected'".to_string())
        }
        Ok(status) => Ok(status),
        Err(_) => Err(format!("Unknown action '{action}'")),
    }
}

#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    pub action: String,
    pub note: Option<String>,
}

/// PUT `/api/payments/admin/{payment_id}/process`
///
/// Approve or reject one payment request, stamping the acting staff member
/// and timestamp. Re-processing an already-decided request is permitted.
/// Staff only (router layer).
///
/// ### Responses
/// - `200 OK` with the populated payment
/// - `400 Bad Request` (unknown action)
/// - `404 Not Found` (unknown payment)
pub async fn process_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<ProcessRequest>,
) -> (StatusCode, Json<ApiResponse<Option<PaymentDto>>>) {
    let status = match parse_decision(&req.action) {
        Ok(status) => status,
        Err(message) => {
            return (StatusCode::BAD_REQUEST, Json(ApiResponse::error(message)));
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
            tracing::error!(error = %e, "Failed to process payment");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

    match populate_payment(db, payment).await {
        Ok(dto) => (
            StatusCode::OK,
            Json(ApiResponse::success(Some(dto), "Payment processed")),
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

#[derive(Debug, Deserialize)]
pub struct BulkProcessRequest {
    pub payment_ids: Vec<i64>,
    pub action: String,
    pub note: Option<String>,
}

#[derive(serde::Serialize, Default)]
pub struct BulkProcessResponse {
    pub modified_count: u64,
}

/// PUT `/api/payments/admin/bulk-process`
///
/// Apply one decision and note to a set of payment requests in a single
/// multi-row update. Atomic per row, not as a set; prior per-row state is not
/// checked. Staff only (router layer).
///
/// ### Responses
/// - `200 OK` with `modified_count`
/// - `400 Bad Request` (empty id list or unknown action)
pub async fn bulk_process_payments(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<BulkProcessRequest>,
) -> (StatusCode, Json<ApiResponse<BulkProcessResponse>>) {
    if req.payment_ids.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("No payment ids supplied")),
        );
    }

    let status = match parse_decision(&req.action) {
        Ok(status) => status,
        Err(message) => {
            return (StatusCode::BAD_REQUEST, Json(ApiResponse::error(message)));
        }
    };

    match PaymentModel::bulk_process(
        state.db(),
        &req.payment_ids,
        status,
        claims.sub,
        req.note.as_deref(),
    )
    .await
    {
        Ok(modified_count) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                BulkProcessResponse { modified_count },
                "Payments processed",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to bulk process payments");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}
