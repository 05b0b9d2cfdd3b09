//! Account repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `accounts` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Balances cross the SQL boundary as integer cents only.
//! - `find_by_last_name` filters via the SQL `WHERE` clause; the predicate
//!   never runs client-side.

use crate::db::DbError;
use crate::model::account::{balance_from_cents, Account, AccountId, AccountValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ACCOUNT_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    email,
    birthday,
    creation_time,
    balance_cents
FROM accounts";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for account persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(AccountValidationError),
    Db(DbError),
    /// An update was requested for an account that was never persisted.
    MissingId,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingId => write!(f, "cannot update an account that has no id"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::MissingId => None,
        }
    }
}

impl From<AccountValidationError> for RepoError {
    fn from(value: AccountValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for account CRUD operations.
pub trait AccountRepository {
    /// Inserts a new row and returns the generated key. Any `id` already on
    /// the value is ignored; a fresh row is always created.
    fn insert(&self, account: &Account) -> RepoResult<AccountId>;
    /// Looks one account up by primary key. Absence is `None`.
    fn find_by_id(&self, id: AccountId) -> RepoResult<Option<Account>>;
    /// Full table scan. Order is unspecified.
    fn find_all(&self) -> RepoResult<Vec<Account>>;
    /// Returns every account with the given last name, filtered server-side.
    fn find_by_last_name(&self, last_name: &str) -> RepoResult<Vec<Account>>;
    /// Full-row overwrite keyed by `id`. A non-matching id is a zero-row
    /// no-op.
    fn update(&self, account: &Account) -> RepoResult<()>;
    /// Deletes by primary key. Deleting a missing id succeeds silently.
    fn delete_by_id(&self, id: AccountId) -> RepoResult<()>;
}

/// SQLite-backed account repository.
pub struct SqliteAccountRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAccountRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AccountRepository for SqliteAccountRepository<'_> {
    fn insert(&self, account: &Account) -> RepoResult<AccountId> {
        let balance_cents = account.balance_cents()?;

        self.conn.execute(
            "INSERT INTO accounts (
                first_name,
                last_name,
                email,
                birthday,
                creation_time,
                balance_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                account.first_name.as_str(),
                account.last_name.as_str(),
                account.email.as_str(),
                account.birthday,
                account.creation_time,
                balance_cents,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn find_by_id(&self, id: AccountId) -> RepoResult<Option<Account>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACCOUNT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_account_row(row)?));
        }

        Ok(None)
    }

    fn find_all(&self) -> RepoResult<Vec<Account>> {
        let mut stmt = self.conn.prepare(&format!("{ACCOUNT_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut accounts = Vec::new();

        while let Some(row) = rows.next()? {
            accounts.push(parse_account_row(row)?);
        }

        Ok(accounts)
    }

    fn find_by_last_name(&self, last_name: &str) -> RepoResult<Vec<Account>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACCOUNT_SELECT_SQL} WHERE last_name = ?1;"))?;
        let mut rows = stmt.query([last_name])?;
        let mut accounts = Vec::new();

        while let Some(row) = rows.next()? {
            accounts.push(parse_account_row(row)?);
        }

        Ok(accounts)
    }

    fn update(&self, account: &Account) -> RepoResult<()> {
        let id = account.id.ok_or(RepoError::MissingId)?;
        let balance_cents = account.balance_cents()?;

        self.conn.execute(
            "UPDATE accounts
             SET
                first_name = ?1,
                last_name = ?2,
                email = ?3,
                birthday = ?4,
                creation_time = ?5,
                balance_cents = ?6
             WHERE id = ?7;",
            params![
                account.first_name.as_str(),
                account.last_name.as_str(),
                account.email.as_str(),
                account.birthday,
                account.creation_time,
                balance_cents,
                id,
            ],
        )?;

        Ok(())
    }

    fn delete_by_id(&self, id: AccountId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM accounts WHERE id = ?1;", params![id])?;
        Ok(())
    }
}

fn parse_account_row(row: &Row<'_>) -> RepoResult<Account> {
    let balance_cents: i64 = row.get("balance_cents")?;

    Ok(Account {
        id: Some(row.get("id")?),
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        birthday: row.get("birthday")?,
        creation_time: row.get("creation_time")?,
        balance: balance_from_cents(balance_cents),
    })
}
