//! Cross-class payment-request administration under `/api/admin`.
//!
//! The whole group sits behind the staff guard applied by the parent router.

use axum::{
    Router,
    routing::{delete, get, put},
};
use util::state::AppState;

mod delete;
mod get;
mod put;

pub use delete::delete_payment_request;
pub use get::list_payment_requests;
pub use put::update_payment_status;

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/all-payment-requests", get(list_payment_requests))
        .route(
            "/payment-requests/{payment_id}/status",
            put(update_payment_status),
        )
        .route(
            "/payment-requests/{payment_id}",
            delete(delete_payment_request),
        )
}
