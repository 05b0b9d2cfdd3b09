//! Random account generator for tests and local experiments.
//!
//! # Responsibility
//! - Build realistic-looking `Account` values with randomized fields.
//!
//! # Invariants
//! - Generated balances are whole currency units in
//!   `[MIN_BALANCE_VALUE, MAX_BALANCE_VALUE)`, carried at scale 2.

use crate::model::account::Account;
use chrono::NaiveDate;
use rand::Rng;
use rust_decimal::Decimal;

pub const MIN_BALANCE_VALUE: i64 = 1_000;
pub const MAX_BALANCE_VALUE: i64 = 200_000;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Bart", "Clara", "Dmytro", "Elena", "Frank", "Grace", "Homer", "Iryna", "Jonas",
    "Kateryna", "Lisa", "Marge", "Nils", "Oksana", "Petro",
];

const LAST_NAMES: &[&str] = &[
    "Andersen", "Bondar", "Carlsen", "Dahl", "Eriksen", "Fischer", "Gruber", "Hansen", "Ivanov",
    "Jensen", "Koval", "Larsen", "Melnyk", "Nilsen", "Olsen", "Petersen",
];

/// Generates one unpersisted account with randomized fields.
pub fn generate_account() -> Account {
    let mut rng = rand::thread_rng();
    let first_name = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
    let last_name = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
    let email = format!(
        "{}.{}@example.com",
        first_name.to_lowercase(),
        last_name.to_lowercase()
    );

    let mut account = Account::new(first_name, last_name, email, random_birthday(&mut rng));
    account.balance = random_balance(&mut rng);
    account
}

/// Generates `count` independently randomized accounts.
pub fn generate_account_list(count: usize) -> Vec<Account> {
    (0..count).map(|_| generate_account()).collect()
}

fn random_birthday(rng: &mut impl Rng) -> NaiveDate {
    let year = rng.gen_range(1950..=2004);
    let month = rng.gen_range(1..=12);
    let day = rng.gen_range(1..=28);
    NaiveDate::from_ymd_opt(year, month, day).expect("days up to 28 exist in every month")
}

fn random_balance(rng: &mut impl Rng) -> Decimal {
    let whole_units = rng.gen_range(MIN_BALANCE_VALUE..MAX_BALANCE_VALUE);
    Decimal::new(whole_units * 100, 2)
}
