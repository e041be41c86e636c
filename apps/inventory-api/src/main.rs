//! Inventory API - REST server

use tracing::info;

mod api;
mod config;
mod logging;
mod openapi;
mod seed;
mod server;
mod state;

use config::Config;
use logging::{init_tracing, install_color_eyre};
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(config.environment);

    let state = AppState::new(config);
    info!(
        replenish_quantity = state.config.inventory.replenish_quantity,
        "Inventory service initialized"
    );

    if state.config.seed_demo_data {
        seed::seed(&state.service).await?;
    }

    let api_routes = api::routes(&state);
    let app = server::create_router::<openapi::ApiDoc>(
        api_routes,
        &state.config.cors_allowed_origins,
    )?;

    info!("Starting Inventory API on {}", state.config.server.address());

    server::serve(app, &state.config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Inventory API shutdown complete");
    Ok(())
}
