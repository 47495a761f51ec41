//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod account;
pub mod ledger;
pub mod session;

pub use account::{AccountError, AccountRepository};
pub use ledger::{AppliedChange, LedgerRepository};
pub use session::SessionRepository;
