//! # Axum Helpers
//!
//! Shared HTTP building blocks for the marketplace services.
//!
//! ## Modules
//!
//! - **[`auth`]**: bearer-token authentication and the owner-only guard
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//! - **[`http`]**: security headers middleware
//! - **[`errors`]**: `AppError` and error codes
//! - **[`response`]**: the success envelope
//! - **[`extractors`]**: UUID path, validated JSON and validated query
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! let config = ServerConfig::default();
//! let router = create_router::<ApiDoc>(Router::new(), &config)?;
//! create_production_app(router, &config, Duration::from_secs(30), async {}).await?;
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod response;
pub mod server;

pub use auth::{
    AuthError, AuthUser, CurrentUser, JwtAuth, JwtClaims, JwtConfig, MaybeAuthUser, Ownership,
    jwt_auth_middleware, load_and_authorize, optional_jwt_auth_middleware,
};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{UuidPath, ValidatedJson, ValidatedQuery};

pub use response::{ApiResponse, MessageResponse, Pagination};
