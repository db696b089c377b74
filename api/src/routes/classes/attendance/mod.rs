use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
};
use util::state::AppState;

mod common;
mod delete;
mod get;
mod post;
mod put;

pub use delete::delete_sheet;
pub use get::{get_sheet, list_sheets};
pub use post::create_sheet;
pub use put::{finalize_sheet, upsert_entries};

use crate::auth::guards::{allow_admin, require_enrolled, require_staff_or_monitor};

pub fn attendance_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/sheets",
            get(list_sheets).route_layer(from_fn_with_state(app_state.clone(), require_enrolled)),
        )
        .route(
            "/sheets",
            post(create_sheet)
                .route_layer(from_fn_with_state(app_state.clone(), require_staff_or_monitor)),
        )
        .route(
            "/sheets/{sheet_id}",
            get(get_sheet).route_layer(from_fn_with_state(app_state.clone(), require_enrolled)),
        )
        .route(
            "/sheets/{sheet_id}/entries",
            put(upsert_entries)
                .route_layer(from_fn_with_state(app_state.clone(), require_staff_or_monitor)),
        )
        .route(
            "/sheets/{sheet_id}/finalize",
            put(finalize_sheet)
                .route_layer(from_fn_with_state(app_state.clone(), require_staff_or_monitor)),
        )
        .route(
            "/sheets/{sheet_id}",
            delete(delete_sheet).route_layer(from_fn(allow_admin)),
        )
        .with_state(app_state)
}
