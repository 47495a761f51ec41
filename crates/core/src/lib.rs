//! Core business logic for Tally.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//!
//! # Modules
//!
//! - `ledger` - Deposit/withdrawal validation and balance planning
//! - `auth` - Password hashing and authentication errors

pub mod auth;
pub mod ledger;
