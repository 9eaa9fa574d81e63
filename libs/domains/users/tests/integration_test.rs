//! PostgreSQL integration tests for `PostgresUserRepository`.
//!
//! Require Docker: `cargo test -p domain_users -- --ignored`

use domain_users::*;
use test_utils::{TestDataBuilder, TestDatabase};

fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        name: "Integration Seller".to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$test$test".to_string(),
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_find() {
    let db = TestDatabase::new().await;
    let repo = PostgresUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("users_create_and_find");
    let username = builder.username("seller");

    let created = repo.create(new_user(&username)).await.unwrap();
    assert!(created.id > 0);
    assert_eq!(created.product_sold_total, 0);

    let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(by_id, created);

    let by_name = repo.find_by_username(&username).await.unwrap().unwrap();
    assert_eq!(by_name.id, created.id);

    assert!(repo.find_by_username("missinguser").await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unique_index_maps_to_duplicate_username() {
    let db = TestDatabase::new().await;
    let repo = PostgresUserRepository::new(db.connection());
    let username = TestDataBuilder::from_test_name("users_unique").username("seller");

    repo.create(new_user(&username)).await.unwrap();
    let result = repo.create(new_user(&username)).await;

    assert!(matches!(result, Err(UserError::DuplicateUsername(name)) if name == username));
}
