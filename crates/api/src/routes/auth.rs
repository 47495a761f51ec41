//! Registration, login and logout pages.

use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    AppState,
    error::PageError,
    middleware::auth::{clear_session_cookie, session_cookie, session_token},
    notice::{Notice, set_notice, take_notice},
    views,
};
use tally_core::auth::AuthError;
use tally_shared::auth::{LoginForm, RegisterForm};

/// Notice after a successful registration.
pub const REGISTERED: &str = "Registration successful, please log in.";
/// Notice after a successful login.
pub const LOGGED_IN: &str = "Logged in successfully.";
/// Notice after a failed login.
pub const INVALID_CREDENTIALS: &str = "Invalid name or password.";
/// Notice after logging out.
pub const LOGGED_OUT: &str = "You have been logged out.";

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(register_form).post(register))
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
}

/// GET /register
async fn register_form(jar: CookieJar) -> impl IntoResponse {
    let (jar, notice) = take_notice(jar);
    (jar, views::register_page(notice.as_ref(), ""))
}

/// POST /register - Create an account, then send the user to the login page.
async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<Response, PageError> {
    match state.auth.register(&form.name, &form.password).await {
        Ok(_) => {
            let jar = set_notice(jar, &Notice::success(REGISTERED));
            Ok((jar, Redirect::to("/login")).into_response())
        }
        Err(e @ (AuthError::DuplicateName(_) | AuthError::Validation(_))) => {
            let status = if matches!(e, AuthError::DuplicateName(_)) {
                StatusCode::CONFLICT
            } else {
                StatusCode::UNPROCESSABLE_ENTITY
            };
            let notice = Notice::error(format!("{e}."));
            Ok((status, views::register_page(Some(&notice), form.trimmed_name())).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /login
async fn login_form(jar: CookieJar) -> impl IntoResponse {
    let (jar, notice) = take_notice(jar);
    (jar, views::login_page(notice.as_ref(), ""))
}

/// POST /login - Check credentials and open a session.
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, PageError> {
    match state.auth.login(&form.name, &form.password).await {
        Ok(session) => {
            let jar = jar.add(session_cookie(&state.session, session.token));
            let jar = set_notice(jar, &Notice::success(LOGGED_IN));
            Ok((jar, Redirect::to("/account")).into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            let notice = Notice::error(INVALID_CREDENTIALS);
            Ok((
                StatusCode::UNAUTHORIZED,
                views::login_page(Some(&notice), form.trimmed_name()),
            )
                .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /logout - Revoke the session and clear its cookie.
async fn logout(State(state): State<AppState>, jar: CookieJar) -> Result<Response, PageError> {
    state.auth.logout(session_token(&jar, &state.session)).await?;

    let jar = jar.remove(clear_session_cookie(&state.session));
    let jar = set_notice(jar, &Notice::info(LOGGED_OUT));
    Ok((jar, Redirect::to("/")).into_response())
}
