use anyhow::Context;
use tracing::info;

use salon_booking::config::AppConfig;
use salon_booking::logging::init_logging;
use salon_booking::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = AppConfig::resolve_path(|key| std::env::var(key).ok());
    let config = AppConfig::load(config_path.as_deref()).context("Failed to load configuration")?;
    init_logging(&config.log_filter);

    match &config_path {
        Some(path) => info!("Loaded config from {}", path.display()),
        None => info!("No config file found, using defaults"),
    }

    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state, &config.allowed_origin)?;

    info!("Starting server on {}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    info!("Listening on {}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
