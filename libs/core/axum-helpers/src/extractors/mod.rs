//! Custom extractors for Axum handlers.
//!
//! Every rejection is an [`crate::AppError`], so malformed input is reported
//! with the same envelope as any other failure.

pub mod uuid_path;
pub mod validated_json;
pub mod validated_query;

pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
