//! Shared application state handed to the route builders.

use axum_helpers::JwtAuth;

/// Cloned into every route builder; all fields are cheap handles.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: database::postgres::DatabaseConnection,
    /// Token issuer and verifier shared by login and the auth middleware
    pub jwt: JwtAuth,
}
