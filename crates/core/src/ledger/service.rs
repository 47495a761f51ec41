//! Ledger service for validating balance operations.
//!
//! This module turns raw form input into a validated `BalanceChange`. It has
//! no database dependencies; persistence applies the change afterwards.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::amount::parse_amount;
use super::balance::{BalanceChange, plan_change};
use super::entry::EntryKind;
use super::error::LedgerError;

/// A parsed, not yet validated, balance operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Operation kind.
    pub kind: EntryKind,
    /// Requested amount (sign unchecked).
    pub amount: Decimal,
}

/// Ledger service for operation validation.
pub struct LedgerService;

impl LedgerService {
    /// Parses the operation name and amount submitted by the account form.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` for an unknown operation or an
    /// amount that is not a number.
    pub fn parse_operation(operation: &str, raw_amount: &str) -> Result<Operation, LedgerError> {
        let kind = EntryKind::from_str(operation).map_err(|_| LedgerError::InvalidAmount)?;
        let amount = parse_amount(raw_amount)?;
        Ok(Operation { kind, amount })
    }

    /// Validates an operation against the current balance.
    ///
    /// # Errors
    ///
    /// See [`plan_change`].
    pub fn plan(balance: Decimal, operation: Operation) -> Result<BalanceChange, LedgerError> {
        plan_change(balance, operation.kind, operation.amount)
    }
}
