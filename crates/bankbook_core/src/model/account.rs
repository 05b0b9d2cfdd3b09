//! Account domain model.
//!
//! # Responsibility
//! - Define the in-memory shape of one `accounts` row.
//! - Provide the exact cents conversion used by the persistence layer.
//!
//! # Invariants
//! - `id` is `None` until the first successful insert and never changes
//!   afterwards.
//! - `balance` carries at most two fractional digits; anything finer is a
//!   validation error, not a rounding opportunity.
//! - `creation_time` is fixed at construction and persisted verbatim.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Database-generated primary key for accounts.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type AccountId = i64;

/// Validation failure for account state that must not reach the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountValidationError {
    /// Balance has more than two fractional digits.
    BalanceTooPrecise { scale: u32 },
    /// Balance does not fit the storable minor-unit range.
    BalanceOutOfRange,
}

impl Display for AccountValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BalanceTooPrecise { scale } => write!(
                f,
                "balance has scale {scale}; at most 2 fractional digits are storable"
            ),
            Self::BalanceOutOfRange => write!(f, "balance is outside the storable range"),
        }
    }
}

impl Error for AccountValidationError {}

/// One bank account row.
///
/// The record is plain data; identity is assigned by the database on insert
/// and all behavior lives in the repository/service layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Generated primary key. `None` for accounts not yet persisted.
    pub id: Option<AccountId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Calendar date without a time component.
    pub birthday: NaiveDate,
    /// Record creation timestamp, fixed once at construction.
    pub creation_time: NaiveDateTime,
    /// Exact monetary balance, two fractional digits.
    pub balance: Decimal,
}

impl Account {
    /// Creates an unpersisted account with a zero balance.
    ///
    /// # Invariants
    /// - `id` starts as `None` until `save`/`insert` assigns one.
    /// - `balance` starts as `0.00`.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        birthday: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            birthday,
            creation_time: Utc::now().naive_utc(),
            balance: Decimal::new(0, 2),
        }
    }

    /// Returns whether this account has been persisted at least once.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Converts the balance into integer minor units (cents).
    ///
    /// This is the storage representation; it fails instead of rounding when
    /// the balance cannot be expressed exactly.
    pub fn balance_cents(&self) -> Result<i64, AccountValidationError> {
        balance_to_cents(self.balance)
    }

    /// Checks that this account can be persisted without precision loss.
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        self.balance_cents().map(|_| ())
    }
}

/// Converts a decimal balance into exact integer cents.
pub fn balance_to_cents(balance: Decimal) -> Result<i64, AccountValidationError> {
    let scaled = balance
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or(AccountValidationError::BalanceOutOfRange)?;
    if !scaled.is_integer() {
        return Err(AccountValidationError::BalanceTooPrecise {
            scale: balance.scale(),
        });
    }
    scaled.to_i64().ok_or(AccountValidationError::BalanceOutOfRange)
}

/// Converts stored integer cents back into a scale-2 decimal.
pub fn balance_from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}
