use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post, put},
};
use util::state::AppState;

mod common;
mod delete;
mod get;
mod post;
mod put;

pub use delete::delete_announcement;
pub use get::list_announcements;
pub use post::create_announcement;
pub use put::edit_announcement;

use crate::auth::guards::allow_admin;

pub fn announcement_routes(_app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_announcements))
        .route("/", post(create_announcement).route_layer(from_fn(allow_admin)))
        .route(
            "/{announcement_id}",
            put(edit_announcement).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{announcement_id}",
            delete(delete_announcement).route_layer(from_fn(allow_admin)),
        )
}
