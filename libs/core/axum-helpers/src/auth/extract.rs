//! Handler extractors for the principal inserted by the auth middleware.

use super::middleware::CurrentUser;
use crate::errors::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

/// Authenticated caller. Rejects with 401 when the route is not behind
/// [`super::jwt_auth_middleware`] or the middleware found no user.
#[derive(Debug, Clone)]
pub struct AuthUser(pub CurrentUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))
    }
}

/// Caller on routes with optional authentication.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(parts.extensions.get::<CurrentUser>().cloned()))
    }
}
