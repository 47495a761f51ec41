//! Account page, deposit/withdraw form and history.

use axum::{
    Form, Router,
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, warn};

use crate::{
    AppState,
    error::PageError,
    middleware::auth::{AuthAccount, login_redirect},
    notice::{Notice, set_notice, take_notice},
    views,
};
use tally_core::ledger::{LedgerError, LedgerService};
use tally_shared::ledger::TransactionForm;

/// Notice after a successful deposit or withdrawal.
pub const TRANSACTION_COMPLETED: &str = "Transaction completed.";

/// Creates the account router. Every route here needs a live session.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/account", get(show_account).post(submit_transaction))
        .route("/history", get(show_history))
}

/// GET /account - Balance, transaction form and full history.
async fn show_account(
    State(state): State<AppState>,
    AuthAccount(account_id): AuthAccount,
    jar: CookieJar,
) -> Result<Response, PageError> {
    let account = state.auth.accounts().get(account_id.into_inner()).await?;
    let entries = state.ledger.entries_for_account(account.id).await?;

    let (jar, notice) = take_notice(jar);
    Ok((jar, views::account_page(notice.as_ref(), &account, &entries)).into_response())
}

/// POST /account - Apply a deposit or withdrawal, then redirect back.
async fn submit_transaction(
    State(state): State<AppState>,
    AuthAccount(account_id): AuthAccount,
    jar: CookieJar,
    Form(form): Form<TransactionForm>,
) -> Result<Response, PageError> {
    let account_id = account_id.into_inner();

    let result = match LedgerService::parse_operation(&form.operation, &form.amount) {
        Ok(operation) => state.ledger.apply(account_id, operation).await,
        Err(e) => Err(e),
    };

    let notice = match result {
        Ok(applied) => {
            info!(
                %account_id,
                entry_id = %applied.entry.entry_id(),
                "Transaction completed"
            );
            Notice::success(TRANSACTION_COMPLETED)
        }
        Err(
            e @ (LedgerError::InvalidAmount
            | LedgerError::InsufficientFundsOrInvalidAmount
            | LedgerError::ConcurrentModification(_)),
        ) => {
            warn!(%account_id, code = e.error_code(), "Transaction rejected");
            Notice::error(format!("{e}."))
        }
        // The session outlived its account
        Err(LedgerError::AccountNotFound(_)) => return Ok(login_redirect(&state, jar)),
        Err(e) => return Err(e.into()),
    };

    let jar = set_notice(jar, &notice);
    Ok((jar, Redirect::to("/account")).into_response())
}

/// GET /history - Read-only list of ledger entries, newest first.
async fn show_history(
    State(state): State<AppState>,
    AuthAccount(account_id): AuthAccount,
    jar: CookieJar,
) -> Result<Response, PageError> {
    let account = state.auth.accounts().get(account_id.into_inner()).await?;
    let entries = state.ledger.entries_for_account(account.id).await?;

    let (jar, notice) = take_notice(jar);
    Ok((jar, views::history_page(notice.as_ref(), &account, &entries)).into_response())
}
