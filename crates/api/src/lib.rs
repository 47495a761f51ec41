//! HTTP layer with Axum routes and middleware.
//!
//! This crate provides:
//! - Server-rendered HTML pages for registration, login and the account
//! - Session cookie middleware
//! - One-shot notice cookies carried across redirects

pub mod error;
pub mod middleware;
pub mod notice;
pub mod routes;
pub mod views;

use std::sync::Arc;

use axum::{Router, http::header};
use sea_orm::DatabaseConnection;
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

use tally_db::{AuthGate, LedgerRepository};
use tally_shared::config::SessionConfig;

/// Upper bound on the configured session lifetime (ten years).
const MAX_SESSION_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Authentication gate (accounts and sessions).
    pub auth: AuthGate,
    /// Transaction processor and history.
    pub ledger: LedgerRepository,
    /// Session cookie settings.
    pub session: Arc<SessionConfig>,
}

impl AppState {
    /// Builds the state from a connection pool and the session settings.
    #[must_use]
    pub fn new(db: DatabaseConnection, session: SessionConfig) -> Self {
        let ttl_secs = i64::try_from(session.ttl_secs)
            .unwrap_or(MAX_SESSION_TTL_SECS)
            .min(MAX_SESSION_TTL_SECS);
        let ttl = chrono::Duration::seconds(ttl_secs);
        Self {
            auth: AuthGate::new(db.clone(), ttl),
            ledger: LedgerRepository::new(db),
            session: Arc::new(session),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::app_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetSensitiveRequestHeadersLayer::new([header::COOKIE]))
        .with_state(state)
}
