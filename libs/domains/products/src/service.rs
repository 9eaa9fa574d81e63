use axum_helpers::{Pagination, load_and_authorize};
use domain_bank_accounts::BankAccountRepository;
use domain_users::UserRepository;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    BuyProduct, CreateProduct, NewProduct, Product, ProductDetail, ProductListQuery,
    ProductResponse, Purchase, SellerResponse, UpdateProduct,
};
use crate::query::ListFilter;
use crate::repository::ProductRepository;

/// Service layer for product business logic
///
/// Reads sellers and bank accounts through their own repositories; writes
/// spanning several tables go through [`ProductRepository::purchase`].
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
    users: Arc<dyn UserRepository>,
    bank_accounts: Arc<dyn BankAccountRepository>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(
        repository: R,
        users: Arc<dyn UserRepository>,
        bank_accounts: Arc<dyn BankAccountRepository>,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            users,
            bank_accounts,
        }
    }

    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        user_id: i64,
        input: CreateProduct,
    ) -> ProductResult<ProductResponse> {
        let product = self
            .repository
            .create(NewProduct {
                user_id,
                name: input.name,
                price: input.price,
                image_url: input.image_url,
                stock: input.stock,
                condition: input.condition,
                tags: input.tags,
                is_purchasable: input.is_purchasable,
            })
            .await?;

        info!(product_id = %product.uid, "product created");
        Ok(product.into())
    }

    /// One page of products plus the pagination block.
    pub async fn list(
        &self,
        actor: Option<i64>,
        query: ProductListQuery,
    ) -> ProductResult<(Vec<ProductResponse>, Pagination)> {
        let filter = ListFilter::from_query(query, actor);
        let page = self.repository.list(&filter).await?;

        let meta = Pagination {
            limit: filter.limit,
            offset: filter.offset,
            total: page.total,
        };
        Ok((page.products.into_iter().map(Into::into).collect(), meta))
    }

    pub async fn get_detail(&self, uid: Uuid) -> ProductResult<ProductDetail> {
        let product = self
            .repository
            .find_by_uid(uid)
            .await?
            .ok_or(ProductError::NotFound(uid))?;

        let seller_id = product.user_id;
        let seller = self
            .users
            .find_by_id(seller_id)
            .await?
            .ok_or_else(|| ProductError::Internal(format!("Seller {seller_id} missing")))?;
        let accounts = self.bank_accounts.list_by_user(seller.id).await?;

        Ok(ProductDetail {
            product: product.into(),
            seller: SellerResponse {
                name: seller.name,
                product_sold_total: seller.product_sold_total,
                bank_accounts: accounts.into_iter().map(Into::into).collect(),
            },
        })
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        actor: i64,
        uid: Uuid,
        input: UpdateProduct,
    ) -> ProductResult<ProductResponse> {
        let mut product = self.owned(actor, uid).await?;
        product.apply_update(input);

        let updated = self.repository.update(product).await?;
        Ok(updated.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, actor: i64, uid: Uuid) -> ProductResult<()> {
        self.owned(actor, uid).await?;

        if !self.repository.delete(uid).await? {
            return Err(ProductError::NotFound(uid));
        }

        info!(product_id = %uid, "product deleted");
        Ok(())
    }

    /// `stock == 0` leaves the product untouched.
    #[instrument(skip(self))]
    pub async fn update_stock(
        &self,
        actor: i64,
        uid: Uuid,
        stock: i64,
    ) -> ProductResult<ProductResponse> {
        let product = self.owned(actor, uid).await?;
        if stock == 0 {
            return Ok(product.into());
        }

        let updated = self.repository.update_stock(uid, stock).await?;
        Ok(updated.into())
    }

    #[instrument(skip(self, input), fields(quantity = input.quantity))]
    pub async fn buy(&self, buyer: i64, uid: Uuid, input: BuyProduct) -> ProductResult<()> {
        let product = self
            .repository
            .find_by_uid(uid)
            .await?
            .ok_or(ProductError::NotFound(uid))?;

        if !product.is_purchasable {
            return Err(ProductError::NotPurchasable);
        }

        if input.quantity > product.stock {
            return Err(ProductError::InsufficientStock {
                available: product.stock,
                requested: input.quantity,
            });
        }

        let account = self
            .bank_accounts
            .find_by_uid(input.bank_account_id)
            .await?
            .filter(|a| a.user_id == product.user_id)
            .ok_or(ProductError::InvalidBankAccount)?;

        self.repository
            .purchase(Purchase {
                product_uid: uid,
                buyer_id: buyer,
                seller_id: product.user_id,
                bank_account_id: account.id,
                payment_proof_image_url: input.payment_proof_image_url,
                quantity: input.quantity,
            })
            .await?;

        info!(product_id = %uid, buyer, "purchase completed");
        Ok(())
    }

    async fn owned(&self, actor: i64, uid: Uuid) -> ProductResult<Product> {
        load_and_authorize(self.repository.find_by_uid(uid), actor, |p| p.user_id)
            .await?
            .into_result(|| ProductError::NotFound(uid), || ProductError::Forbidden)
    }
}
