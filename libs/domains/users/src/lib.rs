//! Users Domain
//!
//! Registration, sign-in and session lookup for diner accounts. The first
//! account registered becomes the admin.
//!
//! # Usage
//!
//! ```rust,ignore
//! use axum_helpers::{JwtConfig, SessionGate, SessionTokens};
//! use domain_users::{MongoUserRepository, UserService, handlers};
//! use std::sync::Arc;
//!
//! let repository = MongoUserRepository::new(client.database("diner"));
//! repository.ensure_indexes().await?;
//!
//! let service = UserService::new(repository);
//! let tokens = SessionTokens::new(&jwt_config);
//! let gate = SessionGate::new(tokens.clone(), Arc::new(service.session_resolver()));
//!
//! let users = handlers::router(service, tokens, secure_cookies);
//! let auth = handlers::auth_router(gate);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;
pub mod session;

pub use error::{UserError, UserResult};
pub use handlers::{ApiDoc, AuthApiDoc};
pub use models::{
    RegisterRequest, RegisterResponse, Role, SignInRequest, SignInResponse, SignedInUser, User,
    UserResponse, ValidateTokenResponse,
};
pub use mongodb::MongoUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
pub use session::UserSessionResolver;
