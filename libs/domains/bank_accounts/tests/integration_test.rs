//! PostgreSQL integration tests for `PostgresBankAccountRepository`.
//!
//! Require Docker: `cargo test -p domain_bank_accounts -- --ignored`

use domain_bank_accounts::*;
use test_utils::{TestDataBuilder, TestDatabase};
use uuid::Uuid;

fn new_account(user_id: i64) -> NewBankAccount {
    NewBankAccount {
        user_id,
        bank_name: "Bank Central".into(),
        bank_account_name: "Seller One".into(),
        bank_account_number: "1234567890".into(),
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_crud_round() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("bank_accounts_crud");
    let owner = db.create_test_user(&builder.username("seller")).await;
    let repo = PostgresBankAccountRepository::new(db.connection());

    let created = repo.create(new_account(owner)).await.unwrap();
    assert_eq!(created.user_id, owner);

    let mut loaded = repo.find_by_uid(created.uid).await.unwrap().unwrap();
    assert_eq!(loaded, created);

    loaded.bank_name = "Other Bank".into();
    let updated = repo.update(loaded).await.unwrap();
    assert_eq!(updated.bank_name, "Other Bank");
    assert_eq!(updated.bank_account_number, "1234567890");

    assert_eq!(repo.list_by_user(owner).await.unwrap().len(), 1);
    assert!(repo.delete(created.uid).await.unwrap());
    assert!(!repo.delete(created.uid).await.unwrap());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_missing_row() {
    let db = TestDatabase::new().await;
    let owner = db
        .create_test_user(&TestDataBuilder::from_test_name("bank_missing").username("seller"))
        .await;
    let repo = PostgresBankAccountRepository::new(db.connection());

    let mut ghost = repo.create(new_account(owner)).await.unwrap();
    repo.delete(ghost.uid).await.unwrap();
    ghost.uid = Uuid::new_v4();

    let result = repo.update(ghost).await;
    assert!(matches!(result, Err(BankAccountError::NotFound(_))));
}
