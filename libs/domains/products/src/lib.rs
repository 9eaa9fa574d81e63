//! Products Domain
//!
//! Listing, ownership-guarded mutations and the purchase flow.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Preconditions, ownership
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + PostgreSQL implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │    Query    │  ← Listing filter → parameterised SQL
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_products::{PostgresProductRepository, ProductService, handlers};
//!
//! let service = ProductService::new(
//!     PostgresProductRepository::new(db.clone()),
//!     Arc::new(PostgresUserRepository::new(db.clone())),
//!     Arc::new(PostgresBankAccountRepository::new(db.clone())),
//! );
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod query;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    BuyProduct, Condition, CreateProduct, NewProduct, OrderBy, Product, ProductDetail,
    ProductListQuery, ProductPage, ProductResponse, Purchase, SellerResponse, SortBy,
    UpdateProduct, UpdateStock,
};
pub use postgres::PostgresProductRepository;
pub use query::{BuiltQuery, ListFilter, build_list_query};
pub use repository::{InMemoryProductRepository, ProductRepository, PurchaseRecord};
pub use service::ProductService;
