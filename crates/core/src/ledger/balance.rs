//! Balance change planning.
//!
//! The single rule of the ledger: deposits add any positive amount, and
//! withdrawals subtract a positive amount no larger than the balance. The
//! balance therefore never drops below zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount::MAX_AMOUNT;
use super::entry::EntryKind;
use super::error::LedgerError;

/// A validated change to an account balance, ready to be persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceChange {
    /// Operation kind.
    pub kind: EntryKind,
    /// Positive amount moved.
    pub amount: Decimal,
    /// Balance before the operation.
    pub previous_balance: Decimal,
    /// Balance after the operation.
    pub new_balance: Decimal,
}

impl BalanceChange {
    /// Returns the signed effect on the balance.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            EntryKind::Deposit => self.amount,
            EntryKind::Withdrawal => -self.amount,
        }
    }
}

/// Validates an operation against the current balance.
///
/// # Errors
///
/// Returns `LedgerError::InsufficientFundsOrInvalidAmount` when the amount is
/// not positive or a withdrawal exceeds the balance, and
/// `LedgerError::InvalidAmount` when a deposit would push the balance past
/// [`MAX_AMOUNT`].
pub fn plan_change(
    balance: Decimal,
    kind: EntryKind,
    amount: Decimal,
) -> Result<BalanceChange, LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InsufficientFundsOrInvalidAmount);
    }

    let new_balance = match kind {
        EntryKind::Deposit => balance
            .checked_add(amount)
            .filter(|total| *total <= MAX_AMOUNT)
            .ok_or(LedgerError::InvalidAmount)?,
        EntryKind::Withdrawal => {
            if amount > balance {
                return Err(LedgerError::InsufficientFundsOrInvalidAmount);
            }
            balance - amount
        }
    };

    Ok(BalanceChange {
        kind,
        amount,
        previous_balance: balance,
        new_balance,
    })
}
