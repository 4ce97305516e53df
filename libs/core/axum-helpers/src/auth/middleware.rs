use super::cookie::{AUTH_COOKIE, extract_cookie};
use super::tokens::SessionTokens;
use crate::errors::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

pub const NO_TOKEN_MESSAGE: &str = "No token, authorization denied";
pub const INVALID_TOKEN_MESSAGE: &str = "Token is invalid or expired.";
pub const ADMINS_ONLY_MESSAGE: &str = "Access denied. Admins only";

/// Role value that passes [`require_admin`].
pub const ADMIN_ROLE: &str = "admin";

/// The signed-in user attached to a request by [`require_session`].
///
/// Serializes like the stored user, minus the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Raw token the request was authenticated with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(pub String);

/// Looks up the user a session token belongs to.
#[async_trait]
pub trait SessionUserResolver: Send + Sync {
    /// `Ok(None)` when the user no longer exists.
    async fn resolve(&self, user_id: Uuid) -> eyre::Result<Option<SessionUser>>;
}

/// State for [`require_session`]: token verification plus user lookup.
#[derive(Clone)]
pub struct SessionGate {
    tokens: SessionTokens,
    resolver: Arc<dyn SessionUserResolver>,
}

impl SessionGate {
    pub fn new(tokens: SessionTokens, resolver: Arc<dyn SessionUserResolver>) -> Self {
        Self { tokens, resolver }
    }

    pub fn tokens(&self) -> &SessionTokens {
        &self.tokens
    }

    /// Resolve the user behind a raw token.
    pub async fn authenticate(&self, token: &str) -> Result<SessionUser, AppError> {
        let claims = self.tokens.verify(token).map_err(|e| {
            tracing::debug!("Session token verification failed: {}", e);
            AppError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string())
        })?;

        let user_id = claims
            .user_id()
            .map_err(|_| AppError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string()))?;

        match self.resolver.resolve(user_id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => {
                tracing::debug!(%user_id, "Session user no longer exists");
                Err(AppError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string()))
            }
            Err(e) => Err(AppError::InternalServerError(format!(
                "Failed to resolve session user {user_id}: {e}"
            ))),
        }
    }
}

/// Session gate middleware.
///
/// Reads the `auth_token` cookie, verifies it, loads the user and stores
/// [`SessionUser`] and [`SessionToken`] in the request extensions.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, middleware, routing::get};
/// use axum_helpers::auth::{SessionGate, require_session};
///
/// let protected = Router::new()
///     .route("/validate_token", get(handler))
///     .route_layer(middleware::from_fn_with_state(gate, require_session));
/// ```
pub async fn require_session(
    State(gate): State<SessionGate>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_cookie(request.headers(), AUTH_COOKIE) else {
        tracing::debug!("No session cookie on request");
        return AppError::Unauthorized(NO_TOKEN_MESSAGE.to_string()).into_response();
    };

    let user = match gate.authenticate(&token).await {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };

    request.extensions_mut().insert(user);
    request.extensions_mut().insert(SessionToken(token));
    next.run(request).await
}

/// Admin gate. Must run after [`require_session`].
pub async fn require_admin(request: Request, next: Next) -> Response {
    match request.extensions().get::<SessionUser>() {
        None => AppError::Unauthorized(NO_TOKEN_MESSAGE.to_string()).into_response(),
        Some(user) if !user.is_admin() => {
            tracing::info!(user_id = %user.id, "Non-admin user rejected");
            AppError::Forbidden(ADMINS_ONLY_MESSAGE.to_string()).into_response()
        }
        Some(_) => next.run(request).await,
    }
}

/// Extractor for the user resolved by [`require_session`].
pub struct CurrentUser(pub SessionUser);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AppError::Unauthorized(NO_TOKEN_MESSAGE.to_string()))
    }
}

impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionToken>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized(NO_TOKEN_MESSAGE.to_string()))
    }
}
