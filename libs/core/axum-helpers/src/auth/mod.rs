//! Cookie-based session authentication.
//!
//! - Stateless HS256 session tokens with a 24 hour lifetime
//! - `auth_token` cookie helpers
//! - Session and admin gates for protected routes
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware, routing::post};
//! use axum_helpers::auth::{JwtConfig, SessionGate, SessionTokens, require_admin, require_session};
//! use core_config::FromEnv;
//!
//! let tokens = SessionTokens::new(&JwtConfig::from_env()?);
//! let gate = SessionGate::new(tokens, resolver);
//!
//! let admin = Router::new()
//!     .route("/", post(create_item))
//!     .route_layer(middleware::from_fn(require_admin))
//!     .route_layer(middleware::from_fn_with_state(gate, require_session));
//! ```

pub mod config;
pub mod cookie;
pub mod middleware;
pub mod tokens;

pub use config::JwtConfig;
pub use cookie::{AUTH_COOKIE, clear_session_cookie, extract_cookie, session_cookie};
pub use middleware::{
    ADMIN_ROLE, ADMINS_ONLY_MESSAGE, CurrentUser, INVALID_TOKEN_MESSAGE, NO_TOKEN_MESSAGE,
    SessionGate, SessionToken, SessionUser, SessionUserResolver, require_admin, require_session,
};
pub use tokens::{SESSION_TTL_SECS, SessionClaims, SessionTokens};
