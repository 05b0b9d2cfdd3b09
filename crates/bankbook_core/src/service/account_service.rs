//! Account use-case service.
//!
//! # Responsibility
//! - Provide the CRUD entry points callers program against.
//! - Run the all-or-nothing bonus operation inside one explicit SQLite
//!   transaction.
//!
//! # Invariants
//! - The service holds the connection handle directly; the bonus operation
//!   opens, commits, or rolls back its transaction on that handle with no
//!   implicit demarcation.
//! - A bonus call never leaves partial balance updates observable.

use crate::model::account::{Account, AccountId};
use crate::repo::account_repo::{AccountRepository, RepoError, SqliteAccountRepository};
use log::{error, info};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure surface of the account service.
#[derive(Debug)]
pub enum ServiceError {
    /// `get_by_id` was called for an id with no matching row.
    AccountNotFound(AccountId),
    /// Any repository/persistence failure, propagated unchanged.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AccountNotFound(id) => write!(f, "account not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AccountNotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<rusqlite::Error> for ServiceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(RepoError::from(value))
    }
}

/// Use-case service over one SQLite connection.
///
/// Constructed by explicit composition: the caller opens the connection via
/// [`crate::db::open_db`] and hands it to the service.
pub struct AccountService<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> AccountService<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }

    fn repo(&self) -> SqliteAccountRepository<'_> {
        SqliteAccountRepository::new(&*self.conn)
    }

    /// Persists a new account and writes the generated id back into it.
    pub fn save(&self, account: &mut Account) -> ServiceResult<AccountId> {
        let id = self.repo().insert(account)?;
        account.id = Some(id);
        Ok(id)
    }

    /// Loads one account by id.
    ///
    /// This is the one operation whose callers require the row to exist, so
    /// absence is surfaced as [`ServiceError::AccountNotFound`] instead of
    /// an empty result.
    pub fn get_by_id(&self, id: AccountId) -> ServiceResult<Account> {
        self.repo()
            .find_by_id(id)?
            .ok_or(ServiceError::AccountNotFound(id))
    }

    /// Returns every persisted account as a materialized list.
    pub fn get_all(&self) -> ServiceResult<Vec<Account>> {
        Ok(self.repo().find_all()?)
    }

    /// Returns the accounts with the given last name. Empty on no match.
    pub fn find_by_last_name(&self, last_name: &str) -> ServiceResult<Vec<Account>> {
        Ok(self.repo().find_by_last_name(last_name)?)
    }

    /// Overwrites the stored row for an already-persisted account.
    ///
    /// No existence check is performed; an id with no row is a zero-row
    /// no-op.
    pub fn update(&self, account: &Account) -> ServiceResult<()> {
        self.repo().update(account)?;
        Ok(())
    }

    /// Deletes one account by id. Missing ids succeed silently.
    pub fn remove_by_id(&self, id: AccountId) -> ServiceResult<()> {
        self.repo().delete_by_id(id)?;
        Ok(())
    }

    /// Adds `amount` to the balance of every account with the given last
    /// name, atomically.
    ///
    /// # Contract
    /// - Fetch, mutate, and write-back all happen inside one `IMMEDIATE`
    ///   transaction on this service's connection.
    /// - If any single write fails (e.g. the non-negative balance CHECK
    ///   rejects one row mid-batch), every write of this call is rolled
    ///   back and the originating error propagates.
    /// - Zero matching accounts is a successful no-op.
    pub fn bonus_everyone_by_last_name(
        &mut self,
        amount: Decimal,
        last_name: &str,
    ) -> ServiceResult<()> {
        let started_at = Instant::now();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        match apply_bonus_in_tx(&tx, amount, last_name) {
            Ok(matched) => {
                tx.commit()?;
                info!(
                    "event=bonus_apply module=service status=ok matched={matched} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                // Dropping the uncommitted transaction rolls back every
                // write issued by this call.
                drop(tx);
                error!(
                    "event=bonus_apply module=service status=error duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }
}

fn apply_bonus_in_tx(
    tx: &Transaction<'_>,
    amount: Decimal,
    last_name: &str,
) -> ServiceResult<usize> {
    let repo = SqliteAccountRepository::new(tx);
    let accounts = repo.find_by_last_name(last_name)?;
    let matched = accounts.len();

    for mut account in accounts {
        account.balance += amount;
        repo.update(&account)?;
    }

    Ok(matched)
}
