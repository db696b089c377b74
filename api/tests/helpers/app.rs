//! Test harness: a fully routed app over a fresh in-memory database.

use axum::{
    Router,
    body::Body,
    http::{Request, header},
};
use migration::Migrator;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use util::{
    config::AppConfig,
    state::AppState,
};

use api::routes::routes;

/// Deterministic configuration for tests; no environment variables involved.
fn test_config() -> AppConfig {
    AppConfig {
        env: "test".into(),
        project_name: "tutor-portal".into(),
        log_level: "api=warn".into(),
        log_file: "api-test.log".into(),
        log_to_stdout: false,
        database_path: "sqlite::memory:".into(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: "test-secret".into(),
        jwt_duration_minutes: 60,
        reset_token_expiry_minutes: 15,
        max_password_reset_requests_per_hour: 3,
        smtp_host: "smtp.example.com".into(),
        smtp_port: 587,
        smtp_username: String::new(),
        smtp_password: String::new(),
        frontend_url: "http://localhost:5173".into(),
        email_from_name: "Tutor Portal".into(),
    }
}

/// Builds the full router over a fresh, migrated in-memory database.
///
/// Each call gets its own database, so tests are independent; the returned
/// connection seeds fixtures directly through the db crate's models.
pub async fn make_test_app() -> (Router, DatabaseConnection) {
    AppConfig::set(test_config());

    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory db");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let state = AppState::new(db.clone(), None);
    let app = Router::new()
        .nest("/api", routes(state.clone()))
        .with_state(state);

    (app, db)
}

/// Builds a JSON request with a bearer token.
pub fn authed_request(
    method: &str,
    uri: &str,
    token: &str,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json");

    match body {
        Some(json) => builder.body(Body::from(json.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Builds a JSON request without credentials.
pub fn unauthed_request(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    match body {
        Some(json) => builder.body(Body::from(json.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Collects a response body into JSON.
pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    use http_body_util::BodyExt;

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Body was not valid JSON")
}
