//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data-access contract for `Account` persistence.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Write paths convert balances to exact cents before any SQL mutation.
//! - Row filters (last-name lookup) execute in the database, never in
//!   application memory.
//! - Absence of a row is a first-class `None`, not an error.

pub mod account_repo;
