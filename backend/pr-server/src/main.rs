use pr_push::{FcmProvider, PushProvider, UnavailableProvider};
use pr_server::{AppState, build_router, logger};
use pr_store::JsonStore;

use std::error::Error;
use std::sync::Arc;

use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = pr_config::Config::load()?;
    config.validate()?;

    // Initialize logger (before any other logging)
    let config_dir = pr_config::Config::config_dir()?;
    logger::initialize(&config.logging, &config_dir)?;

    info!("Starting pr-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let data_dir = config.data_dir()?;
    info!("Data directory: {}", data_dir.display());
    let store = JsonStore::open(data_dir)?;

    // A missing or broken service account must not stop token registration
    // and credential issuance; push routes report the error instead.
    let service_account_path = config.service_account_path()?;
    let (provider, provider_ready): (Arc<dyn PushProvider>, bool) =
        match FcmProvider::from_config(&config.fcm, service_account_path.as_deref()) {
            Ok(provider) => (Arc::new(provider), true),
            Err(e) => {
                error!("Push provider unavailable: {}", e);
                (
                    Arc::new(UnavailableProvider::new(e.provider_message())),
                    false,
                )
            }
        };

    let app_state = AppState::load(&store, provider, provider_ready, config.tenants.clone())?;
    let app = build_router(app_state, &config.cors);

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
                Err(e) => error!("Failed to listen for SIGINT: {}", e),
            }
        })
        .await?;

    info!("Graceful shutdown complete");

    Ok(())
}
