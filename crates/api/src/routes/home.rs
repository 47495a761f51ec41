//! Landing page.

use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{AppState, error::PageError, middleware::auth::current_account, notice::take_notice, views};

/// Creates the landing page route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}

/// GET / - Links to register/login, or to the account page when logged in.
async fn index(State(state): State<AppState>, jar: CookieJar) -> Result<Response, PageError> {
    let account = match current_account(&state, &jar).await? {
        Some(id) => state.auth.accounts().find_by_id(id.into_inner()).await?,
        None => None,
    };

    let (jar, notice) = take_notice(jar);
    let page = views::index_page(notice.as_ref(), account.as_ref().map(|a| a.name.as_str()));
    Ok((jar, page).into_response())
}
