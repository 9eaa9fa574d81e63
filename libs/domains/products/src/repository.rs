use async_trait::async_trait;
use chrono::Utc;
use domain_users::InMemoryUserRepository;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, Product, ProductPage, Purchase};
use crate::query::ListFilter;

/// Repository trait for product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: NewProduct) -> ProductResult<Product>;

    async fn find_by_uid(&self, uid: Uuid) -> ProductResult<Option<Product>>;

    async fn list(&self, filter: &ListFilter) -> ProductResult<ProductPage>;

    /// Persist every editable field of `product` except stock.
    async fn update(&self, product: Product) -> ProductResult<Product>;

    async fn update_stock(&self, uid: Uuid, stock: i64) -> ProductResult<Product>;

    /// `false` when no row matched.
    async fn delete(&self, uid: Uuid) -> ProductResult<bool>;

    /// Apply a purchase atomically: decrement stock, bump the purchase
    /// count, record the transaction and credit the seller. Either every
    /// step lands or none does.
    async fn purchase(&self, purchase: Purchase) -> ProductResult<()>;
}

/// Stored purchase record of the in-memory repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRecord {
    pub buyer_id: i64,
    pub product_id: i64,
    pub bank_account_id: i64,
    pub image_url: String,
    pub quantity: i64,
}

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    products: BTreeMap<i64, Product>,
    purchases: Vec<PurchaseRecord>,
}

impl Store {
    fn id_of(&self, uid: Uuid) -> Option<i64> {
        self.products.values().find(|p| p.uid == uid).map(|p| p.id)
    }
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Holds a handle on the user store so a purchase can credit the seller.
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
    users: InMemoryUserRepository,
}

impl InMemoryProductRepository {
    pub fn new(users: InMemoryUserRepository) -> Self {
        Self {
            store: Arc::default(),
            users,
        }
    }

    pub async fn purchases(&self) -> Vec<PurchaseRecord> {
        self.store.read().await.purchases.clone()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: NewProduct) -> ProductResult<Product> {
        let mut store = self.store.write().await;
        store.next_id += 1;

        let created = Product {
            id: store.next_id,
            uid: Uuid::new_v4(),
            user_id: product.user_id,
            name: product.name,
            price: product.price,
            image_url: product.image_url,
            stock: product.stock,
            condition: product.condition,
            tags: product.tags,
            is_purchasable: product.is_purchasable,
            purchase_count: 0,
            created_at: Utc::now(),
        };
        store.products.insert(created.id, created.clone());

        Ok(created)
    }

    async fn find_by_uid(&self, uid: Uuid) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.values().find(|p| p.uid == uid).cloned())
    }

    async fn list(&self, filter: &ListFilter) -> ProductResult<ProductPage> {
        let store = self.store.read().await;

        let mut matching: Vec<_> = store
            .products
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        matching.sort_by(|a, b| filter.compare(a, b));

        let mut total = matching.len() as u64;
        if filter.is_paginated() {
            matching = matching
                .into_iter()
                .skip(usize::try_from(filter.offset).unwrap_or(usize::MAX))
                .take(usize::try_from(filter.limit).unwrap_or(usize::MAX))
                .collect();
            // COUNT(*) OVER() yields nothing on an empty page.
            if matching.is_empty() {
                total = 0;
            }
        }

        Ok(ProductPage {
            products: matching,
            total,
        })
    }

    async fn update(&self, product: Product) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        match store.products.get_mut(&product.id) {
            Some(existing) => {
                existing.name = product.name;
                existing.price = product.price;
                existing.image_url = product.image_url;
                existing.condition = product.condition;
                existing.tags = product.tags;
                existing.is_purchasable = product.is_purchasable;
                Ok(existing.clone())
            }
            None => Err(ProductError::NotFound(product.uid)),
        }
    }

    async fn update_stock(&self, uid: Uuid, stock: i64) -> ProductResult<Product> {
        let mut store = self.store.write().await;
        let id = store.id_of(uid).ok_or(ProductError::NotFound(uid))?;

        match store.products.get_mut(&id) {
            Some(product) => {
                product.stock = stock;
                Ok(product.clone())
            }
            None => Err(ProductError::NotFound(uid)),
        }
    }

    async fn delete(&self, uid: Uuid) -> ProductResult<bool> {
        let mut store = self.store.write().await;
        let id = store.id_of(uid);

        Ok(id.and_then(|id| store.products.remove(&id)).is_some())
    }

    async fn purchase(&self, purchase: Purchase) -> ProductResult<()> {
        let mut store = self.store.write().await;

        let id = store
            .id_of(purchase.product_uid)
            .ok_or(ProductError::NotFound(purchase.product_uid))?;
        let available = store.products.get(&id).map(|p| p.stock).unwrap_or(0);
        if available < purchase.quantity {
            return Err(ProductError::StockChanged {
                requested: purchase.quantity,
            });
        }

        // The seller is credited first so a failure leaves nothing to undo.
        if !self
            .users
            .add_product_sold(purchase.seller_id, purchase.quantity)
            .await
        {
            return Err(ProductError::Internal(format!(
                "Seller {} not found",
                purchase.seller_id
            )));
        }

        if let Some(product) = store.products.get_mut(&id) {
            product.stock -= purchase.quantity;
            product.purchase_count += purchase.quantity;
        }
        store.purchases.push(PurchaseRecord {
            buyer_id: purchase.buyer_id,
            product_id: id,
            bank_account_id: purchase.bank_account_id,
            image_url: purchase.payment_proof_image_url,
            quantity: purchase.quantity,
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Condition, SortBy};
    use domain_users::{NewUser, UserRepository};

    fn new_product(user_id: i64, name: &str, price: i64, stock: i64) -> NewProduct {
        NewProduct {
            user_id,
            name: name.to_string(),
            price,
            image_url: "https://images.example.com/item.png".into(),
            stock,
            condition: Condition::New,
            tags: vec!["general".into()],
            is_purchasable: true,
        }
    }

    #[tokio::test]
    async fn test_list_paginates_after_counting() {
        let repo = InMemoryProductRepository::new(InMemoryUserRepository::new());
        for price in [300, 100, 200] {
            repo.create(new_product(1, "Desk chair", price, 1))
                .await
                .unwrap();
        }

        let page = repo
            .list(&ListFilter {
                sort_by: Some(SortBy::Price),
                limit: 2,
                offset: 1,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total, 3);
        let prices: Vec<_> = page.products.iter().map(|p| p.price).collect();
        assert_eq!(prices, [200, 300]);

        let past_end = repo
            .list(&ListFilter {
                limit: 2,
                offset: 3,
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(past_end.products.is_empty());
        assert_eq!(past_end.total, 0);
    }

    #[tokio::test]
    async fn test_purchase_is_all_or_nothing() {
        let users = InMemoryUserRepository::new();
        let seller = users
            .create(NewUser {
                username: "seller01".into(),
                name: "Seller One".into(),
                password_hash: "hash".into(),
            })
            .await
            .unwrap();

        let repo = InMemoryProductRepository::new(users.clone());
        let product = repo
            .create(new_product(seller.id, "Desk chair", 100, 5))
            .await
            .unwrap();

        let purchase = Purchase {
            product_uid: product.uid,
            buyer_id: 99,
            seller_id: seller.id,
            bank_account_id: 1,
            payment_proof_image_url: "https://images.example.com/proof.png".into(),
            quantity: 3,
        };

        users.remove(seller.id).await;
        let failed = repo.purchase(purchase.clone()).await;
        assert!(matches!(failed, Err(ProductError::Internal(_))));

        let unchanged = repo.find_by_uid(product.uid).await.unwrap().unwrap();
        assert_eq!(unchanged.stock, 5);
        assert_eq!(unchanged.purchase_count, 0);
        assert!(repo.purchases().await.is_empty());
    }

    #[tokio::test]
    async fn test_purchase_over_stock_changes_nothing() {
        let repo = InMemoryProductRepository::new(InMemoryUserRepository::new());
        let product = repo
            .create(new_product(1, "Desk chair", 100, 2))
            .await
            .unwrap();

        let result = repo
            .purchase(Purchase {
                product_uid: product.uid,
                buyer_id: 2,
                seller_id: 1,
                bank_account_id: 1,
                payment_proof_image_url: "https://images.example.com/proof.png".into(),
                quantity: 3,
            })
            .await;

        assert!(matches!(result, Err(ProductError::StockChanged { requested: 3 })));
        assert_eq!(
            repo.find_by_uid(product.uid).await.unwrap().unwrap().stock,
            2
        );
    }
}
