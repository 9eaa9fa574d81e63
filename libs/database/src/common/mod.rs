//! Error type and retry helpers shared by the connectors.

pub mod error;
pub mod retry;

pub use error::{DatabaseError, DatabaseResult, is_unique_violation};
pub use retry::{RetryConfig, retry, retry_with_backoff};
