//! Air Quality GeoAPI server binary.
//!
//! Builds the repository from the environment, sets up the router and serves
//! requests until interrupted.
//!
//! # Usage
//!
//! ```bash
//! # In-memory repository seeded from a JSON file
//! REPOSITORY_TYPE=local LOCAL_SEED_PATH=fixtures/seed.json \
//!   cargo run --bin geoapi-server
//!
//! # PostgreSQL repository
//! POSTGRES_HOST=localhost POSTGRES_DB=airquality \
//!   cargo run --bin geoapi-server --features "postgres-repo,http-server"
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`, `PORT`, `ALLOWED_ORIGINS`, `REQUEST_TIMEOUT_SECS`: see [`ServerConfig`]
//! - `REPOSITORY_TYPE`, `REPOSITORY_CONFIG`, `LOCAL_SEED_PATH`: backend selection
//! - `POSTGRES_HOST`, `POSTGRES_PORT`, `POSTGRES_DB`, `POSTGRES_USER`,
//!   `POSTGRES_PASSWORD` or `DATABASE_URL`: datastore connection
//! - `RUST_LOG`: log filter (default: info)

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use airquality_geoapi::config::ServerConfig;
use airquality_geoapi::db::RepositoryFactory;
use airquality_geoapi::http::{create_router_with_config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Air Quality GeoAPI");

    let config = ServerConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;
    let repository = RepositoryFactory::from_env().await?;
    info!("Repository initialized successfully");

    let app = create_router_with_config(AppState::new(repository), &config);

    let addr: SocketAddr = config.bind_address().parse()?;
    info!(
        origins = ?config.allowed_origins,
        timeout_secs = config.request_timeout.as_secs(),
        "Server listening on http://{}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
