use axum::{Router, middleware};
use axum_helpers::jwt_auth_middleware;
use domain_bank_accounts::{BankAccountService, PostgresBankAccountRepository, handlers};

/// Every bank account route requires a valid token.
pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PostgresBankAccountRepository::new(state.db.clone());
    let service = BankAccountService::new(repository);

    handlers::router(service).layer(middleware::from_fn_with_state(
        state.jwt.clone(),
        jwt_auth_middleware,
    ))
}
