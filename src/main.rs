use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use medbridge_backend::config::Config;
use medbridge_backend::routes;
use medbridge_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("medbridge_backend=debug,tower_http=debug")),
        )
        .init();

    let config = load_config()?;
    let host = config.server.host.clone();
    let port = config.server.port;

    let app_state = AppState::new(config)?;
    let app = routes::app(app_state);

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    info!("Starting server on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

/// `MEDBRIDGE_CONFIG` names a file that must load; without it the default locations are tried
fn load_config() -> Result<Config> {
    let explicit = std::env::var_os("MEDBRIDGE_CONFIG").map(PathBuf::from);
    let (config, source) = Config::discover(explicit)?;

    match source {
        Some(path) => info!("Loaded configuration from: {}", path.display()),
        None => {
            debug!("Tried config paths: {:?}", Config::default_paths());
            warn!("No configuration file found, using defaults");
        }
    }
    Ok(config)
}
