//! Ledger error types for validation and state errors.

use thiserror::Error;
use uuid::Uuid;

use tally_shared::AppError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Amount is not a finite decimal number, or the operation is unknown.
    #[error("Invalid amount")]
    InvalidAmount,

    /// Amount is not positive, or a withdrawal exceeds the balance.
    ///
    /// Both causes share one variant: the caller is told the operation was
    /// rejected without learning which check failed.
    #[error("Invalid amount or insufficient funds")]
    InsufficientFundsOrInvalidAmount,

    // ========== Account Errors ==========
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    // ========== Concurrency Errors ==========
    /// The balance changed underneath us too many times in a row.
    #[error("Concurrent modification detected for account {0}, please retry")]
    ConcurrentModification(Uuid),

    // ========== Database Errors ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl LedgerError {
    /// Returns the error code for logs and API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::InsufficientFundsOrInvalidAmount => "INSUFFICIENT_FUNDS_OR_INVALID_AMOUNT",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::ConcurrentModification(_) => "CONCURRENT_MODIFICATION",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidAmount => 400,
            Self::InsufficientFundsOrInvalidAmount => 422,
            Self::AccountNotFound(_) => 404,
            Self::ConcurrentModification(_) => 409,
            Self::Database(_) => 500,
        }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentModification(_))
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::InvalidAmount => Self::Validation(message),
            LedgerError::InsufficientFundsOrInvalidAmount => Self::BusinessRule(message),
            LedgerError::AccountNotFound(_) => Self::NotFound(message),
            LedgerError::ConcurrentModification(_) => Self::Conflict(message),
            LedgerError::Database(_) => Self::Database(message),
        }
    }
}
