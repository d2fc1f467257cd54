//! Products API - REST server for the product catalog

use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
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
    let dotenv_loaded = core_config::load_dotenv();

    let config = Config::from_env()?;
    init_tracing(&config.environment);
    if dotenv_loaded {
        info!("Loaded environment from .env");
    }

    // Traffic is only accepted once the store has answered a ping
    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = database::mongodb::database_for(&mongo_client, &config.mongodb);

    info!("Connected to MongoDB database: {}", db.name());

    let state = AppState {
        config: config.clone(),
        mongo_client,
        db,
    };

    let api_routes = api::routes(&state);
    let root_routes = health_router(state.config.app).merge(api::health::router(state.clone()));
    let app = create_router::<openapi::ApiDoc>(api_routes, root_routes, &state.config.cors)?;

    info!(
        "Starting Products API on port {}",
        state.config.server.port
    );

    let mongo_client = state.mongo_client.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            database::mongodb::close(mongo_client).await;
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}
