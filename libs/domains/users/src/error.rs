use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, AuthError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("Username '{0}' is already taken")]
    DuplicateUsername(String),

    #[error("Wrong username or password")]
    InvalidCredentials,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Token(#[from] AuthError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound => AppError::NotFound("User not found".into()),
            e @ UserError::DuplicateUsername(_) => AppError::Conflict(e.to_string()),
            e @ UserError::InvalidCredentials => AppError::Unauthorized(e.to_string()),
            UserError::Token(e) => e.into(),
            UserError::PasswordHash(msg) | UserError::Internal(msg) => {
                AppError::InternalServerError(msg)
            }
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (UserError::NotFound, StatusCode::NOT_FOUND),
            (
                UserError::DuplicateUsername("sellerone".into()),
                StatusCode::CONFLICT,
            ),
            (UserError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (
                UserError::PasswordHash("bad salt".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                UserError::Token(AuthError::Signing("no key".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
