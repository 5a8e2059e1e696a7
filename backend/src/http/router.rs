//! Router configuration for the HTTP API.
//!
//! Sets up all routes and middleware (CORS, request timeout, compression,
//! tracing).

use std::time::Duration;

use axum::{
    http::{HeaderValue, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

use super::handlers;
use super::state::AppState;
use crate::config::{AllowedOrigins, ServerConfig};

/// Create the application router with default server settings.
pub fn create_router(state: AppState) -> Router {
    create_router_with_config(state, &ServerConfig::default())
}

/// Create the application router with all routes and middleware.
pub fn create_router_with_config(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/health/db", get(handlers::health_db))
        .route("/measurements", get(handlers::list_measurements))
        .route(
            "/measurements/timeseries",
            get(handlers::measurements_timeseries),
        )
        .route("/stations", get(handlers::list_stations))
        .route("/stations_wkt", get(handlers::list_stations_wkt))
        .layer(timeout_layer(config.request_timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.allowed_origins))
        .with_state(state)
}

/// Requests running longer than `timeout` are answered with 408.
pub fn timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

/// Any method and header; credentials are never allowed.
pub fn cors_layer(origins: &AllowedOrigins) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    match origins {
        AllowedOrigins::Any => layer.allow_origin(Any),
        AllowedOrigins::List(list) => {
            let values: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!(origin = %origin, "ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            layer.allow_origin(AllowOrigin::list(values))
        }
    }
}
