//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration and written with the
//! schema builder so the same code runs on SQLite and PostgreSQL.

pub use sea_orm_migration::prelude::*;

mod m20261019_000001_accounts_ledger;
mod m20261019_000002_sessions;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261019_000001_accounts_ledger::Migration),
            Box::new(m20261019_000002_sessions::Migration),
        ]
    }
}
