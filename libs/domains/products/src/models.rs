use chrono::{DateTime, Utc};
use domain_bank_accounts::BankAccountResponse;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Product condition
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Condition {
    New,
    Second,
}

/// Listing sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Price,
    Date,
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    #[default]
    Asc,
    Desc,
}

/// Product entity, one row of `products`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    /// Public identifier used in URLs
    pub uid: Uuid,
    pub user_id: i64,
    pub name: String,
    pub price: i64,
    pub image_url: String,
    pub stock: i64,
    pub condition: Condition,
    pub tags: Vec<String>,
    pub is_purchasable: bool,
    pub purchase_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Replace every client-editable field except stock.
    pub fn apply_update(&mut self, update: UpdateProduct) {
        self.name = update.name;
        self.price = update.price;
        self.image_url = update.image_url;
        self.condition = update.condition;
        self.tags = update.tags;
        self.is_purchasable = update.is_purchasable;
    }
}

/// Insert payload for [`crate::ProductRepository::create`].
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub user_id: i64,
    pub name: String,
    pub price: i64,
    pub image_url: String,
    pub stock: i64,
    pub condition: Condition,
    pub tags: Vec<String>,
    pub is_purchasable: bool,
}

fn tags_not_blank(tags: &[String]) -> Result<(), ValidationError> {
    if tags.iter().any(|t| t.is_empty()) {
        let error = ValidationError::new("blank_tag");
        return Err(error.with_message("tags must not be empty".into()));
    }
    Ok(())
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(length(min = 5, max = 60))]
    #[schema(example = "Mechanical keyboard", min_length = 5, max_length = 60)]
    pub name: String,
    #[validate(range(min = 0))]
    pub price: i64,
    #[validate(url)]
    #[schema(example = "https://images.example.com/keyboard.png")]
    pub image_url: String,
    #[validate(range(min = 0))]
    pub stock: i64,
    pub condition: Condition,
    #[validate(length(min = 1), custom(function = "tags_not_blank"))]
    pub tags: Vec<String>,
    pub is_purchasable: bool,
}

/// Full replacement of a product's editable fields. Stock is changed through
/// the dedicated stock endpoint.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(min = 5, max = 60))]
    pub name: String,
    #[validate(range(min = 0))]
    pub price: i64,
    #[validate(url)]
    pub image_url: String,
    pub condition: Condition,
    #[validate(length(min = 1), custom(function = "tags_not_blank"))]
    pub tags: Vec<String>,
    pub is_purchasable: bool,
}

/// `stock: 0` leaves the stock unchanged.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateStock {
    #[validate(range(min = 0))]
    pub stock: i64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuyProduct {
    pub bank_account_id: Uuid,
    #[validate(url)]
    pub payment_proof_image_url: String,
    #[validate(range(min = 1))]
    pub quantity: i64,
}

/// Everything the purchase transaction needs once preconditions hold.
#[derive(Debug, Clone)]
pub struct Purchase {
    pub product_uid: Uuid,
    pub buyer_id: i64,
    pub seller_id: i64,
    /// Internal id of the seller's bank account
    pub bank_account_id: i64,
    pub payment_proof_image_url: String,
    pub quantity: i64,
}

/// Query string of `GET /v1/product`
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase", default)]
#[validate(schema(function = "validate_list_query"))]
#[into_params(parameter_in = Query)]
pub struct ProductListQuery {
    /// Only the caller's products. Ignored for anonymous callers.
    pub user_only: bool,
    /// Every listed tag must be present (`?tags=a&tags=b`)
    pub tags: Vec<String>,
    pub condition: Option<Condition>,
    /// Include products with zero stock
    pub show_empty_stock: bool,
    #[validate(range(min = 0))]
    pub min_price: Option<i64>,
    #[validate(range(min = 0))]
    pub max_price: Option<i64>,
    /// Case-insensitive substring of the name
    pub search: Option<String>,
    pub sort_by: Option<SortBy>,
    pub order_by: Option<OrderBy>,
    /// 0 or absent means unbounded
    #[validate(range(max = MAX_PAGE_BOUND))]
    pub limit: Option<u64>,
    #[validate(range(max = MAX_PAGE_BOUND))]
    pub offset: Option<u64>,
}

/// Largest `limit`/`offset` that still fits a Postgres BIGINT.
pub const MAX_PAGE_BOUND: u64 = i64::MAX as u64;

fn validate_list_query(query: &ProductListQuery) -> Result<(), ValidationError> {
    if let (Some(min), Some(max)) = (query.min_price, query.max_price) {
        if min > max {
            return Err(ValidationError::new("price_range")
                .with_message("minPrice must not exceed maxPrice".into()));
        }
    }

    if query.offset.unwrap_or(0) != 0 && query.limit.unwrap_or(0) == 0 {
        return Err(ValidationError::new("offset_without_limit")
            .with_message("offset requires limit".into()));
    }

    Ok(())
}

/// Product as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub product_id: Uuid,
    pub name: String,
    pub price: i64,
    pub image_url: String,
    pub stock: i64,
    pub condition: Condition,
    pub tags: Vec<String>,
    pub is_purchasable: bool,
    pub purchase_count: i64,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            product_id: p.uid,
            name: p.name,
            price: p.price,
            image_url: p.image_url,
            stock: p.stock,
            condition: p.condition,
            tags: p.tags,
            is_purchasable: p.is_purchasable,
            purchase_count: p.purchase_count,
        }
    }
}

/// Seller summary shown on the product page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerResponse {
    pub name: String,
    pub product_sold_total: i64,
    pub bank_accounts: Vec<BankAccountResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductDetail {
    pub product: ProductResponse,
    pub seller: SellerResponse,
}

/// One page of the listing plus the total across all pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: u64,
}
