use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{BankAccountError, BankAccountResult};
use crate::models::{BankAccount, NewBankAccount};

/// Repository trait for bank account persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BankAccountRepository: Send + Sync {
    async fn create(&self, account: NewBankAccount) -> BankAccountResult<BankAccount>;

    async fn find_by_uid(&self, uid: Uuid) -> BankAccountResult<Option<BankAccount>>;

    /// Accounts owned by `user_id`, oldest first.
    async fn list_by_user(&self, user_id: i64) -> BankAccountResult<Vec<BankAccount>>;

    /// Persist the name and number fields of `account`.
    async fn update(&self, account: BankAccount) -> BankAccountResult<BankAccount>;

    /// `false` when no row matched.
    async fn delete(&self, uid: Uuid) -> BankAccountResult<bool>;
}

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    accounts: BTreeMap<i64, BankAccount>,
}

/// In-memory implementation of BankAccountRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryBankAccountRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryBankAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BankAccountRepository for InMemoryBankAccountRepository {
    async fn create(&self, account: NewBankAccount) -> BankAccountResult<BankAccount> {
        let mut store = self.store.write().await;
        store.next_id += 1;

        let created = BankAccount {
            id: store.next_id,
            uid: Uuid::new_v4(),
            user_id: account.user_id,
            bank_name: account.bank_name,
            bank_account_name: account.bank_account_name,
            bank_account_number: account.bank_account_number,
            created_at: Utc::now(),
        };
        store.accounts.insert(created.id, created.clone());

        Ok(created)
    }

    async fn find_by_uid(&self, uid: Uuid) -> BankAccountResult<Option<BankAccount>> {
        let store = self.store.read().await;
        Ok(store.accounts.values().find(|a| a.uid == uid).cloned())
    }

    async fn list_by_user(&self, user_id: i64) -> BankAccountResult<Vec<BankAccount>> {
        let store = self.store.read().await;
        Ok(store
            .accounts
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update(&self, account: BankAccount) -> BankAccountResult<BankAccount> {
        let mut store = self.store.write().await;

        match store.accounts.get_mut(&account.id) {
            Some(existing) => {
                existing.bank_name = account.bank_name;
                existing.bank_account_name = account.bank_account_name;
                existing.bank_account_number = account.bank_account_number;
                Ok(existing.clone())
            }
            None => Err(BankAccountError::NotFound(account.uid)),
        }
    }

    async fn delete(&self, uid: Uuid) -> BankAccountResult<bool> {
        let mut store = self.store.write().await;
        let id = store
            .accounts
            .values()
            .find(|a| a.uid == uid)
            .map(|a| a.id);

        Ok(id.and_then(|id| store.accounts.remove(&id)).is_some())
    }
}
