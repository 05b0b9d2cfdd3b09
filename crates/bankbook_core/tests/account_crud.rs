use bankbook_core::db::open_db_in_memory;
use bankbook_core::testdata::{generate_account, generate_account_list};
use bankbook_core::{
    AccountRepository, AccountService, RepoError, ServiceError, SqliteAccountRepository,
};
use rust_decimal::Decimal;

#[test]
fn save_assigns_generated_unique_ids() {
    let mut conn = open_db_in_memory().unwrap();
    let service = AccountService::new(&mut conn);

    let mut first = generate_account();
    let mut second = generate_account();
    let first_id = service.save(&mut first).unwrap();
    let second_id = service.save(&mut second).unwrap();

    assert_eq!(first.id, Some(first_id));
    assert_eq!(second.id, Some(second_id));
    assert_ne!(first_id, second_id);
}

#[test]
fn save_and_get_roundtrip_preserves_every_field() {
    let mut conn = open_db_in_memory().unwrap();
    let service = AccountService::new(&mut conn);

    let mut account = generate_account();
    service.save(&mut account).unwrap();

    let loaded = service.get_by_id(account.id.unwrap()).unwrap();
    assert_eq!(loaded, account);
}

#[test]
fn whole_number_balance_reads_back_with_two_digit_precision() {
    let mut conn = open_db_in_memory().unwrap();
    let service = AccountService::new(&mut conn);

    let mut account = generate_account();
    account.balance = Decimal::new(1000, 0);
    service.save(&mut account).unwrap();

    let loaded = service.get_by_id(account.id.unwrap()).unwrap();
    assert_eq!(loaded.balance, Decimal::new(1000, 0));
    assert_eq!(loaded.balance.to_string(), "1000.00");
}

#[test]
fn get_by_id_fails_for_unknown_id() {
    let mut conn = open_db_in_memory().unwrap();
    let service = AccountService::new(&mut conn);

    let err = service.get_by_id(666).unwrap_err();
    assert!(matches!(err, ServiceError::AccountNotFound(666)));
}

#[test]
fn get_all_returns_every_saved_account() {
    let mut conn = open_db_in_memory().unwrap();
    let service = AccountService::new(&mut conn);

    let mut saved = generate_account_list(10);
    for account in &mut saved {
        service.save(account).unwrap();
    }

    let mut found = service.get_all().unwrap();
    found.sort_by_key(|account| account.id);
    saved.sort_by_key(|account| account.id);
    assert_eq!(found, saved);
}

#[test]
fn find_by_last_name_returns_only_matching_accounts() {
    let mut conn = open_db_in_memory().unwrap();
    let service = AccountService::new(&mut conn);

    let mut targets = generate_account_list(2);
    for account in &mut targets {
        account.last_name = "Muriel".to_string();
        service.save(account).unwrap();
    }
    // The generator's name pool never produces "Muriel".
    let mut others = generate_account_list(3);
    for account in &mut others {
        service.save(account).unwrap();
    }

    let mut found = service.find_by_last_name("Muriel").unwrap();
    found.sort_by_key(|account| account.id);
    targets.sort_by_key(|account| account.id);
    assert_eq!(found, targets);
}

#[test]
fn find_by_last_name_with_no_match_is_empty_not_an_error() {
    let mut conn = open_db_in_memory().unwrap();
    let service = AccountService::new(&mut conn);

    let mut account = generate_account();
    service.save(&mut account).unwrap();

    assert!(service.find_by_last_name("XXXXX").unwrap().is_empty());
}

#[test]
fn update_overwrites_the_stored_row() {
    let mut conn = open_db_in_memory().unwrap();
    let service = AccountService::new(&mut conn);

    let mut account = generate_account();
    service.save(&mut account).unwrap();

    account.balance += Decimal::TEN;
    account.email = "changed@example.com".to_string();
    service.update(&account).unwrap();

    let loaded = service.get_by_id(account.id.unwrap()).unwrap();
    assert_eq!(loaded, account);
}

#[test]
fn update_without_id_is_rejected() {
    let mut conn = open_db_in_memory().unwrap();
    let service = AccountService::new(&mut conn);

    let unsaved = generate_account();
    let err = service.update(&unsaved).unwrap_err();
    assert!(matches!(err, ServiceError::Repo(RepoError::MissingId)));
}

#[test]
fn update_for_unknown_id_is_a_silent_noop() {
    let mut conn = open_db_in_memory().unwrap();
    let service = AccountService::new(&mut conn);

    let mut ghost = generate_account();
    ghost.id = Some(12_345);
    service.update(&ghost).unwrap();

    assert!(service.get_all().unwrap().is_empty());
}

#[test]
fn remove_by_id_leaves_no_matching_rows() {
    let mut conn = open_db_in_memory().unwrap();
    let id = {
        let service = AccountService::new(&mut conn);
        let mut account = generate_account();
        service.save(&mut account).unwrap();
        let id = account.id.unwrap();
        service.remove_by_id(id).unwrap();
        id
    };

    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM accounts WHERE id = ?1;",
            [id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn remove_by_id_for_unknown_id_succeeds_silently() {
    let mut conn = open_db_in_memory().unwrap();
    let service = AccountService::new(&mut conn);

    service.remove_by_id(424_242).unwrap();
}

#[test]
fn repository_reports_absence_as_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAccountRepository::new(&conn);

    assert!(repo.find_by_id(666).unwrap().is_none());
}

#[test]
fn repository_insert_ignores_a_preassigned_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAccountRepository::new(&conn);

    let mut account = generate_account();
    account.id = Some(999);
    let id = repo.insert(&account).unwrap();

    assert_ne!(id, 999);
    let loaded = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.id, Some(id));
    assert_eq!(loaded.last_name, account.last_name);
}

#[test]
fn repository_rejects_unstorable_balance_before_writing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAccountRepository::new(&conn);

    let mut account = generate_account();
    account.balance = Decimal::new(1, 3);
    let err = repo.insert(&account).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let all = repo.find_all().unwrap();
    assert!(all.is_empty());
}
