use axum_helpers::JwtAuth;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::error::{UserError, UserResult};
use crate::models::{AuthResponse, LoginRequest, NewUser, RegisterRequest, User};
use crate::password::{hash_password, verify_password};
use crate::repository::UserRepository;

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    jwt: JwtAuth,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, jwt: JwtAuth) -> Self {
        Self {
            repository: Arc::new(repository),
            jwt,
        }
    }

    /// Create an account and sign the caller in.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn register(&self, input: RegisterRequest) -> UserResult<AuthResponse> {
        if self
            .repository
            .find_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(UserError::DuplicateUsername(input.username));
        }

        let password_hash = hash_password(&input.password)?;

        // The unique index still decides a race between two registrations.
        let user = self
            .repository
            .create(NewUser {
                username: input.username,
                name: input.name,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, "user registered");
        self.issue(user)
    }

    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginRequest) -> UserResult<AuthResponse> {
        let user = self
            .repository
            .find_by_username(&input.username)
            .await?
            .ok_or(UserError::NotFound)?;

        if !verify_password(&input.password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        self.issue(user)
    }

    fn issue(&self, user: User) -> UserResult<AuthResponse> {
        let access_token = self.jwt.issue_token(user.id, &user.name)?;

        Ok(AuthResponse {
            username: user.username,
            name: user.name,
            access_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryUserRepository, MockUserRepository};
    use axum_helpers::JwtConfig;

    fn jwt() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("unit-test-secret-with-at-least-32-chars").unwrap())
    }

    fn register_request(username: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            name: "Seller One".to_string(),
            password: "hunter22".to_string(),
        }
    }

    fn login_request(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_issues_token_for_new_user() {
        let jwt = jwt();
        let service = UserService::new(InMemoryUserRepository::new(), jwt.clone());

        let response = service.register(register_request("sellerone")).await.unwrap();

        assert_eq!(response.username, "sellerone");
        assert_eq!(response.name, "Seller One");
        let claims = jwt.verify_token(&response.access_token).unwrap();
        assert_eq!(claims.user_id().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_password() {
        let repo = InMemoryUserRepository::new();
        let service = UserService::new(repo.clone(), jwt());
        service.register(register_request("sellerone")).await.unwrap();

        let stored = repo.find_by_username("sellerone").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "hunter22");
        assert!(verify_password("hunter22", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let service = UserService::new(InMemoryUserRepository::new(), jwt());
        service.register(register_request("sellerone")).await.unwrap();

        let result = service.register(register_request("sellerone")).await;
        assert!(matches!(result, Err(UserError::DuplicateUsername(_))));
    }

    #[tokio::test]
    async fn test_login_checks_password() {
        let service = UserService::new(InMemoryUserRepository::new(), jwt());
        service.register(register_request("sellerone")).await.unwrap();

        let ok = service.login(login_request("sellerone", "hunter22")).await;
        assert!(ok.is_ok());

        let wrong = service.login(login_request("sellerone", "hunter23")).await;
        assert!(matches!(wrong, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let service = UserService::new(InMemoryUserRepository::new(), jwt());
        let result = service.login(login_request("nobody", "hunter22")).await;
        assert!(matches!(result, Err(UserError::NotFound)));
    }

    #[tokio::test]
    async fn test_repository_failure_propagates() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Err(UserError::Internal("connection reset".into())));

        let service = UserService::new(repo, jwt());
        let result = service.login(login_request("sellerone", "hunter22")).await;
        assert!(matches!(result, Err(UserError::Internal(_))));
    }
}
