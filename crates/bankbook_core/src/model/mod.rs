//! Domain model for persisted bank accounts.
//!
//! # Responsibility
//! - Define the canonical `Account` record shared by repository and service
//!   layers.
//! - Own monetary precision rules for the account balance.
//!
//! # Invariants
//! - A persisted account always carries a database-assigned `id`.
//! - Balances are exact two-digit decimals; floating point never enters the
//!   model.

pub mod account;
