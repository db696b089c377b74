use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sea_orm::ModelTrait;
use util::state::AppState;

use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use db::models::payment::Model as PaymentModel;

/// DELETE `/api/admin/payment-requests/{payment_id}`
///
/// Unconditionally remove a payment request. Staff only (router layer).
pub async fn delete_payment_request(
    State(state): State<AppState>,
    Path(payment_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<Empty>>) {
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

    match payment.delete(db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty {}, "Payment request deleted")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete payment request");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}
