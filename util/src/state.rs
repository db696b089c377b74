//! Application state container shared across Axum route handlers and services.
//!
//! This struct holds shared resources such as the database connection and the
//! SMTP mailer. It is cheap to clone and passed into route handlers via Axum's
//! `State<T>` extractor.

use crate::mailer::Mailer;
use sea_orm::DatabaseConnection;

/// Central application state shared across the server.
///
/// This includes:
/// - A cloned, thread-safe database connection for use with SeaORM.
/// - The outbound `Mailer`, absent when SMTP is not configured (tests,
///   development without credentials).
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    mailer: Option<Mailer>,
}

impl AppState {
    /// Creates a new `AppState` with the given database connection and mailer.
    pub fn new(db: DatabaseConnection, mailer: Option<Mailer>) -> Self {
        Self { db, mailer }
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Returns the mailer, if one was configured at startup.
    pub fn mailer(&self) -> Option<&Mailer> {
        self.mailer.as_ref()
    }

    /// Returns a cloned copy of the database connection.
    ///
    /// Useful for async contexts or spawning tasks that require ownership.
    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }
}
