//! Ledger repository: the persistence half of the transaction processor.
//!
//! A balance change is read, validated and written inside one database
//! transaction together with its ledger entry. The account row is updated
//! with a compare-and-set on `version`; if another writer committed first
//! the attempt is rolled back and retried against the fresh balance.
//!
//! Each attempt claims the account row with a no-op write before reading it.
//! On SQLite this takes the write lock up front, so contending writers queue
//! on the busy timeout instead of failing with `SQLITE_BUSY` at their first
//! write. Lock errors that still surface are retried like a lost race.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr,
    EntityTrait, IntoSimpleExpr, QueryFilter, QueryOrder, RuntimeErr, Set, TransactionTrait, sea_query::Expr,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use tally_core::ledger::{
    BalanceChange, EntryKind as CoreEntryKind, LedgerError, LedgerService, Operation,
    from_minor_units, to_minor_units,
};
use tally_shared::types::LedgerEntryId;

use super::account::AccountRepository;
use crate::entities::{accounts, ledger_entries};

/// Attempts made before giving up on a contended account.
const MAX_APPLY_ATTEMPTS: u32 = 3;

/// SQLite primary result codes for a held lock. Extended codes such as
/// `SQLITE_BUSY_SNAPSHOT` (517) carry these in their low byte.
const SQLITE_BUSY: u32 = 5;
const SQLITE_LOCKED: u32 = 6;

impl ledger_entries::Model {
    /// Returns the typed entry ID.
    #[must_use]
    pub const fn entry_id(&self) -> LedgerEntryId {
        LedgerEntryId::from_uuid(self.id)
    }

    /// Returns the entry kind as the domain type.
    #[must_use]
    pub fn entry_kind(&self) -> CoreEntryKind {
        self.kind.into()
    }

    /// Returns the amount as a decimal.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        from_minor_units(self.amount_cents)
    }

    /// Returns the balance after this entry as a decimal.
    #[must_use]
    pub fn balance_after(&self) -> Decimal {
        from_minor_units(self.balance_after_cents)
    }
}

/// Result of a successfully applied operation.
#[derive(Debug, Clone)]
pub struct AppliedChange {
    /// The account as persisted after the change.
    pub account: accounts::Model,
    /// The ledger entry recording the change.
    pub entry: ledger_entries::Model,
}

/// Ledger repository for applying operations and reading history.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates and applies a deposit or withdrawal to an account.
    ///
    /// Either both the new balance and the ledger entry are stored, or
    /// neither is.
    ///
    /// # Errors
    ///
    /// - `LedgerError::InsufficientFundsOrInvalidAmount` if the amount is not
    ///   positive or a withdrawal exceeds the balance
    /// - `LedgerError::InvalidAmount` if the result cannot be stored
    /// - `LedgerError::AccountNotFound` if the account does not exist
    /// - `LedgerError::ConcurrentModification` if every attempt lost a race
    /// - `LedgerError::Database` on storage failure
    pub async fn apply(
        &self,
        account_id: Uuid,
        operation: Operation,
    ) -> Result<AppliedChange, LedgerError> {
        for attempt in 1..=MAX_APPLY_ATTEMPTS {
            match self.try_apply(account_id, operation).await {
                Err(err) if err.is_retryable() && attempt < MAX_APPLY_ATTEMPTS => {
                    warn!(%account_id, attempt, "Balance changed concurrently, retrying");
                }
                result => return result,
            }
        }

        Err(LedgerError::ConcurrentModification(account_id))
    }

    /// One read-validate-write cycle.
    async fn try_apply(
        &self,
        account_id: Uuid,
        operation: Operation,
    ) -> Result<AppliedChange, LedgerError> {
        let backend = self.db.get_database_backend();
        let to_ledger = |err: DbErr| ledger_error(account_id, backend, err);
        let txn = self.db.begin().await.map_err(to_ledger)?;

        claim_account(&txn, account_id).await.map_err(to_ledger)?;

        let account = AccountRepository::find_by_id_on(&txn, account_id)
            .await
            .map_err(to_ledger)?
            .ok_or(LedgerError::AccountNotFound(account_id))?;

        // Dropping `txn` on an early return rolls it back
        let change = LedgerService::plan(account.balance(), operation)?;
        let new_balance_cents = to_minor_units(change.new_balance)?;
        let amount_cents = to_minor_units(change.amount)?;
        let now = Utc::now();

        let stored = compare_and_set_balance(&txn, &account, new_balance_cents, now)
            .await
            .map_err(to_ledger)?;

        if !stored {
            txn.rollback().await.map_err(to_ledger)?;
            return Err(LedgerError::ConcurrentModification(account_id));
        }

        let entry = ledger_entries::ActiveModel {
            id: Set(LedgerEntryId::new().into_inner()),
            account_id: Set(account_id),
            kind: Set(change.kind.into()),
            amount_cents: Set(amount_cents),
            balance_after_cents: Set(new_balance_cents),
            created_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(to_ledger)?;

        txn.commit().await.map_err(to_ledger)?;

        log_applied(account_id, &change);

        Ok(AppliedChange {
            account: accounts::Model {
                balance_cents: new_balance_cents,
                version: account.version + 1,
                updated_at: now,
                ..account
            },
            entry,
        })
    }

    /// Returns every ledger entry of an account, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn entries_for_account(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<ledger_entries::Model>, DbErr> {
        ledger_entries::Entity::find()
            .filter(ledger_entries::Column::AccountId.eq(account_id))
            .order_by_desc(ledger_entries::Column::CreatedAt)
            .order_by_desc(ledger_entries::Column::Id)
            .all(&self.db)
            .await
    }
}

fn log_applied(account_id: Uuid, change: &BalanceChange) {
    info!(
        %account_id,
        kind = %change.kind,
        amount = %change.amount,
        "Ledger entry recorded"
    );
    debug!(
        %account_id,
        previous_balance = %change.previous_balance,
        new_balance = %change.new_balance,
        "Balance updated"
    );
}

/// Takes the write lock on the account row without changing it.
async fn claim_account<C: ConnectionTrait>(conn: &C, account_id: Uuid) -> Result<(), DbErr> {
    accounts::Entity::update_many()
        .col_expr(accounts::Column::Version, Expr::col(accounts::Column::Version).into_simple_expr())
        .filter(accounts::Column::Id.eq(account_id))
        .exec(conn)
        .await?;
    Ok(())
}

/// Stores the new balance and bumps the version, but only if the row still
/// carries the version `account` was read at. Returns whether it was stored.
pub(crate) async fn compare_and_set_balance<C: ConnectionTrait>(
    conn: &C,
    account: &accounts::Model,
    new_balance_cents: i64,
    now: DateTime<Utc>,
) -> Result<bool, DbErr> {
    let updated = accounts::Entity::update_many()
        .col_expr(accounts::Column::BalanceCents, Expr::value(new_balance_cents))
        .col_expr(accounts::Column::Version, Expr::value(account.version + 1))
        .col_expr(accounts::Column::UpdatedAt, Expr::value(now))
        .filter(accounts::Column::Id.eq(account.id))
        .filter(accounts::Column::Version.eq(account.version))
        .exec(conn)
        .await?;

    Ok(updated.rows_affected > 0)
}

/// Maps a storage error, treating SQLite lock contention as a lost race.
fn ledger_error(account_id: Uuid, backend: DbBackend, err: DbErr) -> LedgerError {
    if backend == DbBackend::Sqlite && is_lock_contention(&err) {
        debug!(%account_id, error = %err, "Account row is locked by another writer");
        LedgerError::ConcurrentModification(account_id)
    } else {
        LedgerError::Database(err.to_string())
    }
}

/// Returns true for SQLite busy and locked errors.
fn is_lock_contention(err: &DbErr) -> bool {
    let (DbErr::Conn(runtime) | DbErr::Exec(runtime) | DbErr::Query(runtime)) = err else {
        return false;
    };
    let RuntimeErr::SqlxError(sqlx_err) = runtime else {
        return false;
    };

    sqlx_err
        .as_database_error()
        .and_then(|db_err| db_err.code())
        .and_then(|code| code.parse::<u32>().ok())
        .is_some_and(is_sqlite_lock_code)
}

const fn is_sqlite_lock_code(code: u32) -> bool {
    matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED)
}
