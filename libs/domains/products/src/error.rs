use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(Uuid),

    #[error("Product belongs to another user")]
    Forbidden,

    #[error("Product is not purchasable")]
    NotPurchasable,

    #[error("Insufficient stock: available {available}, requested {requested}")]
    InsufficientStock { available: i64, requested: i64 },

    /// Stock dropped below the requested quantity between the check and the
    /// guarded update.
    #[error("Insufficient stock for requested quantity {requested}")]
    StockChanged { requested: i64 },

    #[error("Bank account is not valid for this product")]
    InvalidBankAccount,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            e @ ProductError::NotFound(_) => AppError::NotFound(e.to_string()),
            e @ ProductError::Forbidden => AppError::Forbidden(e.to_string()),
            e @ (ProductError::NotPurchasable
            | ProductError::InsufficientStock { .. }
            | ProductError::StockChanged { .. }
            | ProductError::InvalidBankAccount) => AppError::BusinessRule(e.to_string()),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<domain_users::UserError> for ProductError {
    fn from(err: domain_users::UserError) -> Self {
        ProductError::Internal(format!("User lookup failed: {}", err))
    }
}

impl From<domain_bank_accounts::BankAccountError> for ProductError {
    fn from(err: domain_bank_accounts::BankAccountError) -> Self {
        ProductError::Internal(format!("Bank account lookup failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_business_rules_are_bad_request() {
        for err in [
            ProductError::NotPurchasable,
            ProductError::InsufficientStock {
                available: 1,
                requested: 2,
            },
            ProductError::StockChanged { requested: 2 },
            ProductError::InvalidBankAccount,
        ] {
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_not_found_and_forbidden_stay_distinct() {
        assert_eq!(
            ProductError::NotFound(Uuid::nil()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ProductError::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
    }
}
