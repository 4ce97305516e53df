use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{RegisterRequest, Role, SignInRequest, User, UserResponse, capitalize_words};
use crate::repository::UserRepository;
use crate::session::UserSessionResolver;

/// User service: registration, credential checks and session lookups.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a user. The very first account becomes the admin.
    #[instrument(skip(self, input))]
    pub async fn register(&self, input: RegisterRequest) -> UserResult<UserResponse> {
        let email = input.email.trim().to_string();

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(UserError::DuplicateEmail(email));
        }

        let password_hash = self.hash_password(input.password.trim())?;
        let role = if self.repository.count().await? == 0 {
            Role::Admin
        } else {
            Role::User
        };

        let user = User::new(
            capitalize_words(&input.first_name),
            capitalize_words(&input.last_name),
            email,
            password_hash,
            role,
        );

        let user = self.repository.insert(user).await?;
        tracing::info!(user_id = %user.id, role = %user.role, "User registered");

        Ok(user.into())
    }

    /// Check email and password. Unknown email and wrong password fail the same way.
    #[instrument(skip(self, input))]
    pub async fn sign_in(&self, input: SignInRequest) -> UserResult<User> {
        let email = input.email.trim();

        let Some(user) = self.repository.find_by_email(email).await? else {
            tracing::debug!("Sign-in for unknown email");
            return Err(UserError::InvalidCredentials);
        };

        if !self.verify_password(&input.password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "Sign-in with wrong password");
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> UserResult<UserResponse> {
        self.repository
            .find_by_id(id)
            .await?
            .map(UserResponse::from)
            .ok_or(UserError::NotFound(id))
    }

    /// Session resolver backed by this service's repository.
    pub fn session_resolver(&self) -> UserSessionResolver<R> {
        UserSessionResolver::new(Arc::clone(&self.repository))
    }

    fn hash_password(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> UserResult<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryUserRepository, MockUserRepository};

    fn register(first: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            first_name: first.to_string(),
            last_name: "smith".to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn sign_in(email: &str, password: &str) -> SignInRequest {
        SignInRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_first_user_is_admin_then_users() {
        let service = UserService::new(InMemoryUserRepository::new());

        let first = service
            .register(register("ada", "ada@diner.test", "secret1"))
            .await
            .unwrap();
        let second = service
            .register(register("bo", "bo@diner.test", "secret2"))
            .await
            .unwrap();

        assert_eq!(first.role, Role::Admin);
        assert_eq!(second.role, Role::User);
    }

    #[tokio::test]
    async fn test_register_normalizes_input() {
        let service = UserService::new(InMemoryUserRepository::new());

        let user = service
            .register(register("mary anne", "  mary@diner.test ", " secret1 "))
            .await
            .unwrap();

        assert_eq!(user.first_name, "Mary Anne");
        assert_eq!(user.last_name, "Smith");
        assert_eq!(user.email, "mary@diner.test");

        // Password is hashed after trimming
        assert!(
            service
                .sign_in(sign_in("mary@diner.test", "secret1"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email == "ada@diner.test")
            .returning(|email| {
                Ok(Some(User::new(
                    "Ada".to_string(),
                    "Lovelace".to_string(),
                    email.to_string(),
                    "hash".to_string(),
                    Role::Admin,
                )))
            });
        repo.expect_insert().never();

        let service = UserService::new(repo);
        let err = service
            .register(register("ada", "ada@diner.test", "secret1"))
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::DuplicateEmail(email) if email == "ada@diner.test"));
    }

    #[tokio::test]
    async fn test_sign_in_checks_password() {
        let service = UserService::new(InMemoryUserRepository::new());
        service
            .register(register("ada", "ada@diner.test", "secret1"))
            .await
            .unwrap();

        let user = service
            .sign_in(sign_in(" ada@diner.test ", "secret1"))
            .await
            .unwrap();
        assert_eq!(user.full_name(), "Ada Smith");
        assert_ne!(user.password_hash, "secret1");

        assert!(matches!(
            service.sign_in(sign_in("ada@diner.test", "wrong-pass")).await,
            Err(UserError::InvalidCredentials)
        ));
        assert!(matches!(
            service.sign_in(sign_in("nobody@diner.test", "secret1")).await,
            Err(UserError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = UserService::new(repo);
        let id = Uuid::now_v7();
        assert!(matches!(
            service.get_user(id).await,
            Err(UserError::NotFound(missing)) if missing == id
        ));
    }
}
