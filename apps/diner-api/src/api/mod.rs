//! API routes, nested under /api by `axum_helpers::create_router`.

pub mod health;
pub mod items;
pub mod users;

use axum::Router;

use crate::state::AppState;

pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/items", items::router(state))
        .nest("/users", users::router(state))
        .nest("/auth", users::auth_router(state))
        .merge(health::router(state.clone()))
}
