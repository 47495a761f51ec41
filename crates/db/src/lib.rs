//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - The authentication gate built on the account and session repositories
//! - Database migrations

pub mod auth;
pub mod entities;
pub mod migration;
pub mod repositories;

pub use auth::{AuthGate, LoginSession};
pub use repositories::{AccountRepository, LedgerRepository, SessionRepository};

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tally_shared::config::DatabaseConfig;
use tracing::info;

/// Establishes a connection pool to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    Database::connect(options).await
}

/// Connects and, when enabled, creates or upgrades the schema.
///
/// # Errors
///
/// Returns an error if the connection or a migration fails.
pub async fn connect_and_migrate(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let db = connect(config).await?;
    if config.run_migrations {
        migration::Migrator::up(&db, None).await?;
        info!("Database schema is up to date");
    }
    Ok(db)
}
