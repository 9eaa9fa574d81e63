use axum::Router;

pub mod bank_accounts;
pub mod health;
pub mod products;
pub mod users;

/// Versioned API routes. Each sub-router already carries its own state and
/// auth layer.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new()
        .nest("/v1/user", users::router(state))
        .nest("/v1/bank/account", bank_accounts::router(state))
        .nest("/v1/product", products::router(state))
}

/// `/ready`, checking the database connection.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
