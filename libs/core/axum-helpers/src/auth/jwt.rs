use super::config::JwtConfig;
use crate::errors::AppError;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no bearer token provided")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token subject is not a user id")]
    InvalidSubject,

    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Signing(msg) => AppError::InternalServerError(msg),
            AuthError::MissingToken => AppError::Unauthorized("Authentication required".into()),
            AuthError::InvalidToken(_) | AuthError::InvalidSubject => {
                AppError::Unauthorized("Invalid or expired token".into())
            }
        }
    }
}

/// JWT claims. `sub` carries the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub name: String,
    pub exp: i64,
    pub iat: i64,
}

impl JwtClaims {
    pub fn user_id(&self) -> Result<i64, AuthError> {
        self.sub.parse().map_err(|_| AuthError::InvalidSubject)
    }
}

/// Stateless HS256 token issuer and verifier.
#[derive(Clone)]
pub struct JwtAuth {
    keys: Arc<Keys>,
    expiry: Duration,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        let keys = Keys {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
        };

        Self {
            keys: Arc::new(keys),
            expiry: config.expiry,
        }
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    pub fn issue_token(&self, user_id: i64, name: &str) -> Result<String, AuthError> {
        let iat = Utc::now().timestamp();
        let claims = JwtClaims {
            sub: user_id.to_string(),
            name: name.to_string(),
            exp: iat + self.expiry.as_secs() as i64,
            iat,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify signature and expiry, then decode the claims.
    pub fn verify_token(&self, token: &str) -> Result<JwtClaims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<JwtClaims>(token, &self.keys.decoding, &validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("test-secret-that-is-long-enough-for-hs256").unwrap())
    }

    #[test]
    fn test_issue_and_verify() {
        let auth = auth();
        let token = auth.issue_token(42, "Seller Name").unwrap();
        let claims = auth.verify_token(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.name, "Seller Name");
        assert_eq!(claims.exp - claims.iat, 28_800);
    }

    #[test]
    fn test_rejects_token_from_other_secret() {
        let other = JwtAuth::new(
            &JwtConfig::new("another-secret-that-is-long-enough-too").unwrap(),
        );
        let token = other.issue_token(1, "someone").unwrap();
        assert!(matches!(
            auth().verify_token(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_rejects_expired_token() {
        let auth = auth();
        let now = Utc::now().timestamp();
        let claims = JwtClaims {
            sub: "1".into(),
            name: "someone".into(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &auth.keys.encoding).unwrap();

        assert!(auth.verify_token(&token).is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(auth().verify_token("not-a-jwt").is_err());
    }

    #[test]
    fn test_non_numeric_subject() {
        let claims = JwtClaims {
            sub: "abc".into(),
            name: "x".into(),
            exp: 0,
            iat: 0,
        };
        assert!(matches!(claims.user_id(), Err(AuthError::InvalidSubject)));
    }
}
