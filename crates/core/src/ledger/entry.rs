//! Ledger entry kinds.

use serde::{Deserialize, Serialize};

/// Kind of balance-affecting operation recorded in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Money paid into the account.
    Deposit,
    /// Money taken out of the account.
    Withdrawal,
}

impl EntryKind {
    /// Returns the stable storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdrawal => "withdrawal",
        }
    }

    /// Returns the label shown in history tables.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Deposit => "Deposit",
            Self::Withdrawal => "Withdrawal",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntryKind {
    type Err = String;

    /// Parses both the storage form and the operation names used by the
    /// account form (`deposit`, `withdraw`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deposit" => Ok(Self::Deposit),
            "withdraw" | "withdrawal" => Ok(Self::Withdrawal),
            _ => Err(format!("Unknown operation: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case("deposit", EntryKind::Deposit)]
    #[case("Deposit", EntryKind::Deposit)]
    #[case("withdraw", EntryKind::Withdrawal)]
    #[case("withdrawal", EntryKind::Withdrawal)]
    #[case(" WITHDRAW ", EntryKind::Withdrawal)]
    fn test_parse_operation(#[case] input: &str, #[case] expected: EntryKind) {
        assert_eq!(EntryKind::from_str(input).unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_operation() {
        assert!(EntryKind::from_str("transfer").is_err());
        assert!(EntryKind::from_str("").is_err());
    }

    #[test]
    fn test_storage_form_round_trips() {
        for kind in [EntryKind::Deposit, EntryKind::Withdrawal] {
            assert_eq!(EntryKind::from_str(kind.as_str()).unwrap(), kind);
        }
    }
}
