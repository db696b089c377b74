//! Content library under `/api/library/{category}/...`.
//!
//! One parameterized module serves every subject category (grammar,
//! literature, paper-bank, grade materials, ...): the category is a path
//! segment validated as a slug, never a separate code path.

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

pub use delete::{delete_file, delete_folder};
pub use get::{list_files, list_folders};
pub use post::{create_file, create_folder};
pub use put::{edit_file, edit_folder};

use crate::auth::guards::allow_admin;

pub fn library_routes() -> Router<AppState> {
    Router::new()
        .route("/{category}/folders", get(list_folders))
        .route(
            "/{category}/folders",
            post(create_folder).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{category}/folders/{folder_id}",
            put(edit_folder).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{category}/folders/{folder_id}",
            delete(delete_folder).route_layer(from_fn(allow_admin)),
        )
        .route("/{category}/folders/{folder_id}/files", get(list_files))
        .route(
            "/{category}/folders/{folder_id}/files",
            post(create_file).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{category}/files/{file_id}",
            put(edit_file).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{category}/files/{file_id}",
            delete(delete_file).route_layer(from_fn(allow_admin)),
        )
}
