use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Fails with `DuplicateEmail` when the email is taken.
    async fn insert(&self, user: User) -> UserResult<User>;

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Exact email lookup
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// Total number of registered users
    async fn count(&self) -> UserResult<u64>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::DuplicateEmail(user.email));
        }

        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn count(&self) -> UserResult<u64> {
        Ok(self.users.read().await.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn user(email: &str) -> User {
        User::new(
            "Test".to_string(),
            "User".to_string(),
            email.to_string(),
            "hash".to_string(),
            Role::User,
        )
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemoryUserRepository::new();
        let created = repo.insert(user("a@diner.test")).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(
            repo.find_by_id(created.id).await.unwrap(),
            Some(created.clone())
        );
        assert_eq!(
            repo.find_by_email("a@diner.test").await.unwrap(),
            Some(created)
        );
        assert_eq!(repo.find_by_email("b@diner.test").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.insert(user("a@diner.test")).await.unwrap();

        let err = repo.insert(user("a@diner.test")).await.unwrap_err();
        assert!(matches!(err, UserError::DuplicateEmail(email) if email == "a@diner.test"));
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
