use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post, put},
};
use util::state::AppState;

pub mod admin;
pub mod common;

mod get;
mod post;
mod put;

pub use get::student_year_view;
pub use post::submit_payment;
pub use put::edit_payment;

use crate::auth::guards::{allow_admin, allow_authenticated};

pub fn payments_routes(app_state: AppState) -> Router<AppState> {
    let student = Router::new()
        .route("/student/{class_id}/{year}", get(student_year_view))
        .route("/submit", post(submit_payment))
        .route("/{payment_id}", put(edit_payment))
        .route_layer(from_fn(allow_authenticated));

    // The first segment after /admin is a class id for the month view and a
    // payment id for processing; axum needs one name per position, handlers
    // extract positionally.
    let staff = Router::new()
        .route("/admin/{id}/{year}/{month}", get(admin::month_view))
        .route("/admin/{id}/process", put(admin::process_payment))
        .route("/admin/bulk-process", put(admin::bulk_process_payments))
        .route_layer(from_fn(allow_admin));

    student.merge(staff).with_state(app_state)
}
