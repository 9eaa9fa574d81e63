//! PostgreSQL connectivity for the marketplace services.
//!
//! - [`postgres::PostgresConfig`] loaded through `core_config::FromEnv`
//! - pooled connections via SeaORM, with startup retry
//! - migration runner generic over any `MigratorTrait`
//! - health probe used by the readiness endpoint
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::{common::RetryConfig, postgres};
//!
//! let config = postgres::PostgresConfig::from_env()?;
//! let db = postgres::connect_from_config_with_retry(config, Some(RetryConfig::new().with_max_retries(5))).await?;
//! postgres::run_migrations::<migration::Migrator>(&db, "marketplace_api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult, is_unique_violation};
