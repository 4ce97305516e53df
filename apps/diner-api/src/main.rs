use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_items::MongoItemRepository;
use domain_users::MongoUserRepository;
use media::CloudinaryStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.redacted_url());
    let mongo_client = database::mongodb::connect_from_config(&config.mongodb).await?;
    let db = mongo_client.database(config.mongodb.database());
    info!(database = config.mongodb.database(), "Connected to MongoDB");

    // Unique indexes back the duplicate name/email checks
    MongoItemRepository::new(db.clone()).ensure_indexes().await?;
    MongoUserRepository::new(db.clone()).ensure_indexes().await?;

    let media = Arc::new(CloudinaryStore::new(config.cloudinary.clone()));
    let state = AppState::new(config, mongo_client, db, media);

    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes, &state.config.cors)?;
    let app = router.merge(health_router(state.config.app));

    info!("Starting Diner API with graceful shutdown (30s timeout)");

    let server = state.config.server.clone();
    create_production_app(app, &server, Duration::from_secs(30), async move {
        info!("Shutting down: closing MongoDB connections");
        state.mongo_client.shutdown().await;
        info!("MongoDB connection closed");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Diner API shutdown complete");
    Ok(())
}
