//! HTTP route entry point for `/api/...`.
//!
//! Routes are organized by domain (authentication, users, classes, payments,
//! library, health), each protected via appropriate access control middleware.
//!
//! Route groups include:
//! - `/health` → Health check endpoint (public)
//! - `/auth` → Authentication endpoints (register, login, password reset)
//! - `/users` → User management endpoints (staff-only)
//! - `/classes` → Class CRUD, enrollment, attendance and announcements
//! - `/payments` → Student payment submission and staff processing
//! - `/admin` → Cross-class payment-request administration (staff-only)
//! - `/library` → Content library folders/files (category as data)

use crate::auth::guards::{allow_admin, allow_authenticated};
use axum::{Router, middleware::from_fn};
use util::state::AppState;

pub mod admin;
pub mod auth;
pub mod classes;
pub mod health;
pub mod library;
pub mod payments;
pub mod users;

/// Builds the complete application router for all HTTP endpoints.
///
/// The returned router has `AppState` as its state type and mounts all core
/// API routes under their respective base paths.
pub fn routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/health", health::health_routes())
        .nest("/auth", auth::auth_routes())
        .nest("/users", users::users_routes().route_layer(from_fn(allow_admin)))
        .nest(
            "/classes",
            classes::classes_routes(app_state.clone()).route_layer(from_fn(allow_authenticated)),
        )
        .nest("/payments", payments::payments_routes(app_state.clone()))
        .nest(
            "/admin",
            admin::admin_routes().route_layer(from_fn(allow_admin)),
        )
        .nest(
            "/library",
            library::library_routes().route_layer(from_fn(allow_authenticated)),
        )
        .with_state(app_state)
}
