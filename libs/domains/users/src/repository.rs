use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User};

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user. A taken username is [`UserError::DuplicateUsername`].
    async fn create(&self, user: NewUser) -> UserResult<User>;

    async fn find_by_id(&self, id: i64) -> UserResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> UserResult<Option<User>>;
}

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    users: BTreeMap<i64, User>,
}

/// In-memory implementation of UserRepository (for development/testing)
///
/// Clones share the same store, so a product repository can hold a handle
/// and bump `product_sold_total` during a purchase.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` to the seller aggregate. `false` when the user is gone.
    pub async fn add_product_sold(&self, id: i64, quantity: i64) -> bool {
        let mut store = self.store.write().await;
        match store.users.get_mut(&id) {
            Some(user) => {
                user.product_sold_total += quantity;
                true
            }
            None => false,
        }
    }

    /// Drop a user, used by tests to force a purchase to fail midway.
    pub async fn remove(&self, id: i64) -> Option<User> {
        self.store.write().await.users.remove(&id)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> UserResult<User> {
        let mut store = self.store.write().await;

        if store.users.values().any(|u| u.username == user.username) {
            return Err(UserError::DuplicateUsername(user.username));
        }

        store.next_id += 1;
        let created = User {
            id: store.next_id,
            username: user.username,
            name: user.name,
            password_hash: user.password_hash,
            product_sold_total: 0,
            created_at: Utc::now(),
        };
        store.users.insert(created.id, created.clone());

        tracing::debug!(user_id = created.id, "Created user");
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> UserResult<Option<User>> {
        Ok(self.store.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}
