//! Enums stored as strings in the database.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use tally_core::ledger::EntryKind as CoreEntryKind;

/// Ledger entry kind column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum EntryKind {
    #[sea_orm(string_value = "deposit")]
    Deposit,
    #[sea_orm(string_value = "withdrawal")]
    Withdrawal,
}

impl From<CoreEntryKind> for EntryKind {
    fn from(kind: CoreEntryKind) -> Self {
        match kind {
            CoreEntryKind::Deposit => Self::Deposit,
            CoreEntryKind::Withdrawal => Self::Withdrawal,
        }
    }
}

impl From<EntryKind> for CoreEntryKind {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Deposit => Self::Deposit,
            EntryKind::Withdrawal => Self::Withdrawal,
        }
    }
}
