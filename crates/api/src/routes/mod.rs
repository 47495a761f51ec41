//! Route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::session_middleware};

pub mod account;
pub mod auth;
pub mod health;
pub mod home;

/// Creates the router with public and session-protected pages.
#[allow(clippy::needless_pass_by_value)]
pub fn app_routes(state: AppState) -> Router<AppState> {
    // Protected routes that require a live session
    let protected_routes = Router::new()
        .merge(account::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(home::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}
