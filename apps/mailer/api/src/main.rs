use axum_helpers::{JwtAuth, create_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_dispatch::{AuthMode, DispatchService, SendGridProvider, handlers};
use std::sync::Arc;
use tracing::{info, warn};

mod config;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let auth = match &config.jwt {
        Some(jwt) => AuthMode::required(JwtAuth::new(jwt)),
        None => {
            warn!("AUTH_REQUIRED is off: the dispatch endpoint accepts anonymous callers");
            AuthMode::Disabled
        }
    };

    // Missing provider settings are reported per request and on /ready, not at startup.
    if let Err(e) = config.dispatch.provider.ready() {
        warn!(error = %e, "Email provider is not ready");
    }

    let provider = SendGridProvider::new(
        config.dispatch.api_url.clone(),
        config.dispatch.provider_timeout,
    )
    .map_err(|e| eyre::eyre!("Failed to initialize SendGrid client: {}", e))?;

    let service = DispatchService::new(config.dispatch.clone(), auth, Arc::new(provider));

    let app = create_router(handlers::router(service).merge(health_router(config.app)));

    info!(name = config.app.name, version = config.app.version, "Starting mail dispatch API");

    create_app(app, &config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Mail dispatch API shutdown complete");
    Ok(())
}
