//! Query-string extractor with validation.

use crate::errors::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::Query;
use serde::de::DeserializeOwned;
use validator::Validate;

/// Query parameters decoded with `axum_extra`'s form decoder, which accepts
/// repeated keys (`?tags=a&tags=b`) as a sequence, then validated.
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(data) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::InvalidQuery(e.to_string()))?;
        data.validate()?;
        Ok(ValidatedQuery(data))
    }
}
