//! Demo data seeder for Tally development.
//!
//! Creates a `demo` account (password `demo`) with a short history so the
//! account page has something to show. Running it twice is harmless.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::Duration;

use tally_core::auth::AuthError;
use tally_core::ledger::{EntryKind, LedgerService};
use tally_db::{AuthGate, LedgerRepository, connect_and_migrate};
use tally_shared::AppConfig;

const DEMO_NAME: &str = "demo";
const DEMO_PASSWORD: &str = "demo";

/// Operations applied to a fresh demo account, oldest first.
const DEMO_OPERATIONS: [(&str, &str); 4] = [
    ("deposit", "250.00"),
    ("withdraw", "40.50"),
    ("deposit", "12.25"),
    ("withdraw", "100"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    println!("Connecting to {}...", config.database.url);
    let db = connect_and_migrate(&config.database)
        .await
        .context("Failed to connect to database")?;

    let auth = AuthGate::new(db.clone(), Duration::hours(1));
    let ledger = LedgerRepository::new(db);

    println!("Seeding demo account...");
    let account = match auth.register(DEMO_NAME, DEMO_PASSWORD).await {
        Ok(account) => account,
        Err(AuthError::DuplicateName(_)) => {
            println!("  Demo account already exists, skipping...");
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to create demo account"),
    };
    println!("  Created account '{DEMO_NAME}' (password '{DEMO_PASSWORD}')");

    for (operation, amount) in DEMO_OPERATIONS {
        let operation = LedgerService::parse_operation(operation, amount)?;
        let applied = ledger.apply(account.id, operation).await?;
        let verb = match operation.kind {
            EntryKind::Deposit => "Deposited",
            EntryKind::Withdrawal => "Withdrew",
        };
        println!(
            "  {verb} {} -> balance {}",
            applied.entry.amount(),
            applied.account.balance()
        );
    }

    println!("Seeding complete!");
    Ok(())
}
