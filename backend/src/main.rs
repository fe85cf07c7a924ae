use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cat_care_backend::config::AppConfig;
use cat_care_backend::{cors_layer, create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG wins; plain info otherwise
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load()?;
    let addr = config.socket_addr()?;

    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state, cors_layer(&config.cors_origin)?);

    info!(
        "Starting server on {} (AI assistant enabled: {})",
        addr,
        config.assistant_enabled()
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
