use super::jwt::{AuthError, JwtAuth};
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

/// Authenticated principal placed in request extensions by the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub name: String,
}

/// `None` when no Authorization header is present. A header without the
/// `Bearer ` scheme counts as an invalid token.
fn bearer_token(headers: &HeaderMap) -> Option<Result<&str, AuthError>> {
    let value = headers.get(header::AUTHORIZATION)?;

    let token = value
        .to_str()
        .ok()
        .and_then(|raw| raw.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AuthError::InvalidToken("malformed Authorization header".into()));

    Some(token)
}

fn authenticate(auth: &JwtAuth, headers: &HeaderMap) -> Result<Option<CurrentUser>, AuthError> {
    let Some(token) = bearer_token(headers) else {
        return Ok(None);
    };

    let claims = auth.verify_token(token?)?;
    let id = claims.user_id()?;

    Ok(Some(CurrentUser {
        id,
        name: claims.name,
    }))
}

/// Required authentication: missing or invalid token is rejected with 401.
///
/// ```ignore
/// let protected = Router::new()
///     .route("/v1/bank/account", get(list_accounts))
///     .layer(axum::middleware::from_fn_with_state(jwt, jwt_auth_middleware));
/// ```
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match authenticate(&auth, request.headers()) {
        Ok(Some(user)) => {
            request.extensions_mut().insert(user);
            Ok(next.run(request).await)
        }
        Ok(None) => {
            tracing::debug!("request without bearer token");
            Err(AuthError::MissingToken.into())
        }
        Err(e) => {
            tracing::debug!(error = %e, "bearer token rejected");
            Err(e.into())
        }
    }
}

/// Optional authentication: a missing token proceeds anonymously, a present
/// but invalid token is still rejected with 401.
pub async fn optional_jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match authenticate(&auth, request.headers()) {
        Ok(Some(user)) => {
            request.extensions_mut().insert(user);
        }
        Ok(None) => {}
        Err(e) => {
            tracing::debug!(error = %e, "bearer token rejected");
            return Err(e.into());
        }
    }

    Ok(next.run(request).await)
}
