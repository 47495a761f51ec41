//! Property-based tests for balance planning.
//!
//! - Deposits of any positive amount add exactly that amount
//! - Withdrawals never take the balance below zero
//! - Rejected operations leave nothing to persist

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::balance::plan_change;
use super::entry::EntryKind;
use super::error::LedgerError;
use super::service::{LedgerService, Operation};

/// Strategy to generate non-negative balances (0.00 to 1,000,000.00).
fn balance_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate non-positive amounts (-10,000.00 to 0.00).
fn non_positive_amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..=0i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn kind_strategy() -> impl Strategy<Value = EntryKind> {
    prop_oneof![Just(EntryKind::Deposit), Just(EntryKind::Withdrawal)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_deposit_adds_amount(balance in balance_strategy(), amount in positive_amount()) {
        let change = plan_change(balance, EntryKind::Deposit, amount).unwrap();
        prop_assert_eq!(change.new_balance, balance + amount);
        prop_assert_eq!(change.previous_balance, balance);
        prop_assert_eq!(change.amount, amount);
    }

    #[test]
    fn prop_withdrawal_never_negative(balance in balance_strategy(), amount in positive_amount()) {
        match plan_change(balance, EntryKind::Withdrawal, amount) {
            Ok(change) => {
                prop_assert!(amount <= balance);
                prop_assert_eq!(change.new_balance, balance - amount);
                prop_assert!(change.new_balance >= Decimal::ZERO);
            }
            Err(err) => {
                prop_assert!(amount > balance);
                prop_assert!(matches!(err, LedgerError::InsufficientFundsOrInvalidAmount));
            }
        }
    }

    #[test]
    fn prop_non_positive_always_rejected(
        balance in balance_strategy(),
        amount in non_positive_amount(),
        kind in kind_strategy(),
    ) {
        let result = LedgerService::plan(balance, Operation { kind, amount });
        prop_assert!(matches!(result, Err(LedgerError::InsufficientFundsOrInvalidAmount)));
    }

    #[test]
    fn prop_signed_amount_matches_delta(
        balance in balance_strategy(),
        amount in positive_amount(),
        kind in kind_strategy(),
    ) {
        if let Ok(change) = plan_change(balance, kind, amount) {
            prop_assert_eq!(change.previous_balance + change.signed_amount(), change.new_balance);
        }
    }

    #[test]
    fn prop_parsed_cents_round_trip(cents in 1i64..1_000_000i64) {
        let amount = Decimal::new(cents, 2);
        let op = LedgerService::parse_operation("deposit", &amount.to_string()).unwrap();
        prop_assert_eq!(op.amount, amount);
    }
}
