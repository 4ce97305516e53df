//! Shared application state.

use axum_helpers::{SessionGate, SessionTokens};
use domain_users::{MongoUserRepository, UserService};
use media::MediaStore;
use mongodb::{Client, Database};
use std::sync::Arc;

use crate::config::Config;

/// Everything the API routers are built from. Clones share connections.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// MongoDB client (shares the underlying connection pool)
    pub mongo_client: Client,
    pub db: Database,
    /// Image uploads for items
    pub media: Arc<dyn MediaStore>,
    pub tokens: SessionTokens,
    pub users: UserService<MongoUserRepository>,
}

impl AppState {
    pub fn new(
        config: Config,
        mongo_client: Client,
        db: Database,
        media: Arc<dyn MediaStore>,
    ) -> Self {
        let tokens = SessionTokens::new(&config.jwt);
        let users = UserService::new(MongoUserRepository::new(db.clone()));

        Self {
            config,
            mongo_client,
            db,
            media,
            tokens,
            users,
        }
    }

    /// Session gate resolving tokens against the `users` collection.
    pub fn session_gate(&self) -> SessionGate {
        SessionGate::new(
            self.tokens.clone(),
            Arc::new(self.users.session_resolver()),
        )
    }
}
