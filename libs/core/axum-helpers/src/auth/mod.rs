//! Authentication and authorization.
//!
//! - Stateless HS256 bearer tokens ([`JwtAuth`])
//! - Required and optional authentication middleware
//! - [`AuthUser`] / [`MaybeAuthUser`] extractors
//! - Owner-only guard for mutations ([`ownership`])
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let jwt = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let protected = Router::new()
//!     .route("/v1/bank/account", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(jwt, jwt_auth_middleware));
//! ```

pub mod config;
pub mod extract;
pub mod jwt;
pub mod middleware;
pub mod ownership;

pub use config::JwtConfig;
pub use extract::{AuthUser, MaybeAuthUser};
pub use jwt::{AuthError, JwtAuth, JwtClaims};
pub use middleware::{CurrentUser, jwt_auth_middleware, optional_jwt_auth_middleware};
pub use ownership::{Ownership, load_and_authorize};
