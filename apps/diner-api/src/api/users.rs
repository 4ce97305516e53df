//! Users and auth API routes

use axum::Router;
use domain_users::handlers;

use crate::state::AppState;

/// `/users`: register, sign in, log out.
pub fn router(state: &AppState) -> Router {
    handlers::router(
        state.users.clone(),
        state.tokens.clone(),
        state.config.secure_cookies(),
    )
}

/// `/auth`: session validation.
pub fn auth_router(state: &AppState) -> Router {
    handlers::auth_router(state.session_gate())
}
