//! Error page rendering for failures that cannot become a notice.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use tally_core::{auth::AuthError, ledger::LedgerError};
use tally_db::repositories::AccountError;
use tally_shared::AppError;

use crate::views;

/// Handler error rendered as an HTML error page.
///
/// Storage and internal failures are logged and shown with a generic
/// message; the detail never reaches the browser.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if self.0.is_user_facing() {
            warn!(code = self.0.error_code(), error = %self.0, "Request rejected");
            self.0.to_string()
        } else {
            error!(code = self.0.error_code(), error = %self.0, "Request failed");
            "Something went wrong. Please try again later.".to_string()
        };

        (status, views::error_page(status, &message)).into_response()
    }
}

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<AuthError> for PageError {
    fn from(err: AuthError) -> Self {
        Self(err.into())
    }
}

impl From<LedgerError> for PageError {
    fn from(err: LedgerError) -> Self {
        Self(err.into())
    }
}

impl From<sea_orm::DbErr> for PageError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<AccountError> for PageError {
    fn from(err: AccountError) -> Self {
        let message = err.to_string();
        Self(match err {
            AccountError::NotFound(_) => AppError::NotFound(message),
            AccountError::DuplicateName(_) => AppError::Conflict(message),
            AccountError::Database(_) => AppError::Database(message),
        })
    }
}
