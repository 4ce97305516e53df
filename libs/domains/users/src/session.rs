//! Session user lookup for the auth gate.

use async_trait::async_trait;
use axum_helpers::{SessionUser, SessionUserResolver};
use std::sync::Arc;
use uuid::Uuid;

use crate::repository::UserRepository;

/// Resolves session tokens to users through a [`UserRepository`].
pub struct UserSessionResolver<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserSessionResolver<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: UserRepository + 'static> SessionUserResolver for UserSessionResolver<R> {
    async fn resolve(&self, user_id: Uuid) -> eyre::Result<Option<SessionUser>> {
        let user = self.repository.find_by_id(user_id).await?;
        Ok(user.map(SessionUser::from))
    }
}
