//! Items API routes

use axum::Router;
use domain_items::{ItemService, MongoItemRepository, handlers};
use std::sync::Arc;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoItemRepository::new(state.db.clone());
    let service = ItemService::new(repository, Arc::clone(&state.media));

    handlers::router(service, state.session_gate())
}
