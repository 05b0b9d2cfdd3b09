//! Business operations exposed to external callers.
//!
//! # Responsibility
//! - Orchestrate repository calls into the account service API.
//! - Own the transaction boundary of the multi-row bonus operation.
//!
//! # Invariants
//! - Absence becomes a failure only in `get_by_id`; every other read
//!   represents a miss as an empty result.
//! - No operation retries; persistence failures propagate immediately.

pub mod account_service;
