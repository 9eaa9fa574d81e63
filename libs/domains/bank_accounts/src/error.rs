use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum BankAccountError {
    #[error("Bank account not found: {0}")]
    NotFound(Uuid),

    #[error("Bank account id is required")]
    MissingId,

    #[error("Bank account belongs to another user")]
    Forbidden,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type BankAccountResult<T> = Result<T, BankAccountError>;

impl From<BankAccountError> for AppError {
    fn from(err: BankAccountError) -> Self {
        match err {
            e @ (BankAccountError::NotFound(_) | BankAccountError::MissingId) => {
                AppError::NotFound(e.to_string())
            }
            e @ BankAccountError::Forbidden => AppError::Forbidden(e.to_string()),
            BankAccountError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for BankAccountError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
