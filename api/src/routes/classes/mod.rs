use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
};
use util::state::AppState;

pub mod announcements;
pub mod attendance;
pub mod students;

mod common;
mod delete;
mod get;
mod post;
mod put;

pub use delete::delete_class;
pub use get::{get_class, list_classes};
pub use post::create_class;
pub use put::edit_class;

use crate::auth::guards::{allow_admin, require_enrolled};

pub fn classes_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_classes))
        .route("/", post(create_class).route_layer(from_fn(allow_admin)))
        .route("/{class_id}", get(get_class))
        .route(
            "/{class_id}",
            put(edit_class).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{class_id}",
            delete(delete_class).route_layer(from_fn(allow_admin)),
        )
        .nest(
            "/{class_id}/students",
            students::students_routes().route_layer(from_fn(allow_admin)),
        )
        .nest(
            "/{class_id}/attendance",
            attendance::attendance_routes(app_state.clone()),
        )
        .nest(
            "/{class_id}/announcements",
            announcements::announcement_routes(app_state.clone()).route_layer(from_fn_with_state(
                app_state.clone(),
                require_enrolled,
            )),
        )
        .with_state(app_state)
}
