//! Account repository for the account store.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, Set, SqlErr,
};
use uuid::Uuid;

use tally_core::ledger::from_minor_units;

use crate::entities::accounts;

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account name already exists.
    #[error("Account name '{0}' already exists")]
    DuplicateName(String),

    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl accounts::Model {
    /// Returns the balance as a decimal amount.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        from_minor_units(self.balance_cents)
    }
}

/// Account repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds an account by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<accounts::Model>, DbErr> {
        accounts::Entity::find()
            .filter(accounts::Column::Name.eq(name))
            .one(&self.db)
            .await
    }

    /// Finds an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<accounts::Model>, DbErr> {
        Self::find_by_id_on(&self.db, id).await
    }

    /// Finds an account by ID on an explicit connection or transaction.
    pub(crate) async fn find_by_id_on<C: ConnectionTrait>(
        conn: &C,
        id: Uuid,
    ) -> Result<Option<accounts::Model>, DbErr> {
        accounts::Entity::find_by_id(id).one(conn).await
    }

    /// Gets an account by ID, failing if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::NotFound` if no account has this ID.
    pub async fn get(&self, id: Uuid) -> Result<accounts::Model, AccountError> {
        self.find_by_id(id).await?.ok_or(AccountError::NotFound(id))
    }

    /// Checks if a name is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn name_exists(&self, name: &str) -> Result<bool, DbErr> {
        let count = accounts::Entity::find()
            .filter(accounts::Column::Name.eq(name))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Creates a new account with a zero balance.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::DuplicateName` if the name is taken, including
    /// when a concurrent registration won the unique index.
    pub async fn create(
        &self,
        name: &str,
        password_hash: &str,
    ) -> Result<accounts::Model, AccountError> {
        if self.name_exists(name).await? {
            return Err(AccountError::DuplicateName(name.to_string()));
        }

        let now = Utc::now();
        let account = accounts::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(name.to_string()),
            password_hash: Set(password_hash.to_string()),
            balance_cents: Set(0),
            version: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };

        account.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AccountError::DuplicateName(name.to_string())
            }
            _ => AccountError::Database(e),
        })
    }

    /// Counts registered accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<u64, DbErr> {
        accounts::Entity::find().count(&self.db).await
    }
}
