use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// User entity, one row of `users`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub name: String,
    /// Argon2 PHC string
    pub password_hash: String,
    /// Units sold across all of this user's products
    pub product_sold_total: i64,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for [`crate::UserRepository::create`].
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub name: String,
    pub password_hash: String,
}

/// Registration payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 5, max = 15))]
    #[schema(example = "sellerone", min_length = 5, max_length = 15)]
    pub username: String,
    #[validate(length(min = 5, max = 50))]
    #[schema(example = "Seller One", min_length = 5, max_length = 50)]
    pub name: String,
    #[validate(length(min = 5, max = 15))]
    #[schema(example = "hunter22", min_length = 5, max_length = 15)]
    pub password: String,
}

/// Login payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 5, max = 15))]
    #[schema(example = "sellerone", min_length = 5, max_length = 15)]
    pub username: String,
    #[validate(length(min = 5, max = 15))]
    #[schema(example = "hunter22", min_length = 5, max_length = 15)]
    pub password: String,
}

/// Returned by both register and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub username: String,
    pub name: String,
    pub access_token: String,
}
