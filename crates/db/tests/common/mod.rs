//! Shared helpers for repository integration tests.

#![allow(dead_code)]

use sea_orm::DatabaseConnection;
use tally_db::{AccountRepository, entities::accounts};
use tally_shared::config::DatabaseConfig;

/// Opens a fresh in-memory SQLite database with the schema applied.
///
/// The pool holds a single connection: every connection to `sqlite::memory:`
/// would otherwise see its own empty database.
pub async fn test_db() -> DatabaseConnection {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        run_migrations: true,
    };
    tally_db::connect_and_migrate(&config)
        .await
        .expect("Failed to set up test database")
}

/// Opens a file-backed SQLite database in `dir` with a pool of several
/// connections, so writers really race.
pub async fn pooled_file_db(dir: &tempfile::TempDir) -> DatabaseConnection {
    let path = dir.path().join("tally.db");
    let config = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", path.display()),
        max_connections: 10,
        min_connections: 1,
        run_migrations: true,
    };
    tally_db::connect_and_migrate(&config)
        .await
        .expect("Failed to set up file database")
}

/// Creates an account with a placeholder hash.
pub async fn create_test_account(db: &DatabaseConnection, name: &str) -> accounts::Model {
    AccountRepository::new(db.clone())
        .create(name, "$argon2id$test_hash")
        .await
        .expect("Failed to create test account")
}
