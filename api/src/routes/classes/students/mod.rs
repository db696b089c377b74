use axum::{
    Router,
    routing::{delete, get, post, put},
};
use util::state::AppState;

mod delete;
mod get;
mod post;
mod put;

pub use delete::unenroll_student;
pub use get::list_students;
pub use post::enroll_student;
pub use put::edit_enrollment;

pub fn students_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_students))
        .route("/", post(enroll_student))
        .route("/{user_id}", put(edit_enrollment))
        .route("/{user_id}", delete(unenroll_student))
}
