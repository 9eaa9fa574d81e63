use axum::{Router, middleware};
use axum_helpers::optional_jwt_auth_middleware;
use domain_bank_accounts::PostgresBankAccountRepository;
use domain_products::{PostgresProductRepository, ProductService, handlers};
use domain_users::PostgresUserRepository;
use std::sync::Arc;

/// Listing and detail are public; the handlers of mutating routes reject
/// anonymous callers themselves.
pub fn router(state: &crate::state::AppState) -> Router {
    let service = ProductService::new(
        PostgresProductRepository::new(state.db.clone()),
        Arc::new(PostgresUserRepository::new(state.db.clone())),
        Arc::new(PostgresBankAccountRepository::new(state.db.clone())),
    );

    handlers::router(service).layer(middleware::from_fn_with_state(
        state.jwt.clone(),
        optional_jwt_auth_middleware,
    ))
}
