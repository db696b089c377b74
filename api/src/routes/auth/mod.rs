use axum::{
    Router,
    routing::{get, post},
};
use util::state::AppState;

mod get;
mod post;

pub use get::me;
pub use post::{forgot_password, login, register, reset_password};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password", post(reset_password))
        .route("/me", get(me))
}
