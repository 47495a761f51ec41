//! Single-balance ledger logic.
//!
//! This module implements the transaction processor's decision step:
//! - Entry kinds (deposit, withdrawal)
//! - Amount parsing for form input
//! - Balance change planning with the non-negative balance rule
//! - Error types for ledger operations

pub mod amount;
pub mod balance;
pub mod entry;
pub mod error;
pub mod service;

#[cfg(test)]
mod service_props;

pub use amount::{AMOUNT_SCALE, MAX_AMOUNT, from_minor_units, parse_amount, to_minor_units};
pub use balance::{BalanceChange, plan_change};
pub use entry::EntryKind;
pub use error::LedgerError;
pub use service::{LedgerService, Operation};
