//! Session middleware for pages that need a logged-in account.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::debug;

use tally_core::auth::AuthError;
use tally_shared::{config::SessionConfig, types::AccountId};

use crate::{
    AppState,
    error::PageError,
    notice::{Notice, set_notice},
};

/// Notice shown when a protected page is requested without a session.
pub const LOGIN_REQUIRED: &str = "Please log in first.";

/// Builds the session cookie for a fresh login.
#[must_use]
pub fn session_cookie(config: &SessionConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookie)
        .build()
}

/// Builds the removal cookie matching [`session_cookie`].
#[must_use]
pub fn clear_session_cookie(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), "")).path("/").build()
}

/// Returns the raw session token sent by the browser, if any.
#[must_use]
pub fn session_token<'a>(jar: &'a CookieJar, config: &SessionConfig) -> Option<&'a str> {
    jar.get(&config.cookie_name)
        .map(Cookie::value)
        .filter(|token| !token.is_empty())
}

/// Resolves the request's session cookie to an account, if it has a live one.
///
/// # Errors
///
/// Returns a `PageError` only for storage failures.
pub async fn current_account(
    state: &AppState,
    jar: &CookieJar,
) -> Result<Option<AccountId>, PageError> {
    let Some(token) = session_token(jar, &state.session) else {
        return Ok(None);
    };

    match state.auth.resolve(token).await {
        Ok(account_id) => Ok(Some(account_id)),
        Err(AuthError::NotAuthenticated) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Redirects to the login page with the "log in first" notice and drops any
/// stale session cookie.
pub fn login_redirect(state: &AppState, jar: CookieJar) -> Response {
    let jar = jar.remove(clear_session_cookie(&state.session));
    let jar = set_notice(jar, &Notice::error(LOGIN_REQUIRED));
    (jar, Redirect::to("/login")).into_response()
}

/// Session middleware for protected pages.
///
/// This middleware:
/// 1. Reads the session cookie
/// 2. Resolves it to a live session through the authentication gate
/// 3. Stores the account ID in request extensions for handlers to access
///
/// Requests without a live session are redirected to `/login`.
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match current_account(&state, &jar).await {
        Ok(Some(account_id)) => {
            request.extensions_mut().insert(AuthAccount(account_id));
            next.run(request).await
        }
        Ok(None) => {
            debug!(path = %request.uri().path(), "No live session, redirecting to login");
            login_redirect(&state, jar)
        }
        Err(e) => e.into_response(),
    }
}

/// Extractor for the authenticated account.
///
/// Use this in handlers behind [`session_middleware`]:
///
/// ```ignore
/// async fn handler(AuthAccount(account_id): AuthAccount) -> impl IntoResponse {
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthAccount(pub AccountId);

impl AuthAccount {
    /// Returns the account ID.
    #[must_use]
    pub const fn account_id(&self) -> AccountId {
        self.0
    }
}

impl<S> FromRequestParts<S> for AuthAccount
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .copied()
            .ok_or_else(|| {
                let jar = set_notice(CookieJar::new(), &Notice::error(LOGIN_REQUIRED));
                (jar, Redirect::to("/login")).into_response()
            })
    }
}
