//! # Axum Helpers
//!
//! Shared building blocks for the diner HTTP services.
//!
//! ## Modules
//!
//! - **[`auth`]**: session tokens, `auth_token` cookie, session and admin gates
//! - **[`server`]**: router setup, health checks, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: structured error responses with error codes
//! - **[`extractors`]**: UUID path, validated JSON/query, multipart-or-JSON forms
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::{cors::CorsConfig, server::ServerConfig};
//! use std::time::Duration;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let cors = CorsConfig::new(["http://localhost:5173"]);
//!     let router = create_router::<ApiDoc>(api_routes, &cors)?;
//!
//!     create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {})
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

// Re-export auth types
pub use auth::{
    AUTH_COOKIE, CurrentUser, JwtConfig, SessionGate, SessionToken, SessionTokens, SessionUser,
    SessionUserResolver, clear_session_cookie, require_admin, require_session, session_cookie,
};

// Re-export server types
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};

// Re-export HTTP middleware
pub use http::{create_cors_layer, security_headers};

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};

// Re-export extractors
pub use extractors::{
    FormPayload, MAX_UPLOAD_BYTES, UploadedFile, UuidPath, ValidatedJson, ValidatedQuery,
};
