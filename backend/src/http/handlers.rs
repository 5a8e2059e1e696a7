//! HTTP handlers for the REST API.
//!
//! Each handler validates its query string and delegates to the service
//! layer.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use super::dto::{
    DbHealthResponse, HealthResponse, MeasurementsParams, StationsParams, TimeseriesParams,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::query::StationQuery;
use crate::models::{FeatureCollection, Measurement, TimePoint, WktStation};
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

// =============================================================================
// Health
// =============================================================================

/// GET /health
///
/// Liveness only; never touches the datastore.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /health/db
pub async fn health_db(State(state): State<AppState>) -> Response {
    match state.repository.health_check().await {
        Ok(true) => Json(DbHealthResponse {
            status: "ok".to_string(),
            database: "connected".to_string(),
        })
        .into_response(),
        Ok(false) => degraded("unhealthy"),
        Err(e) => {
            warn!(error = %e, "datastore health check failed");
            degraded(e.message())
        }
    }
}

fn degraded(reason: impl Into<String>) -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(DbHealthResponse {
            status: "degraded".to_string(),
            database: reason.into(),
        }),
    )
        .into_response()
}

// =============================================================================
// Measurements
// =============================================================================

/// GET /measurements
pub async fn list_measurements(
    State(state): State<AppState>,
    query: Result<Query<MeasurementsParams>, QueryRejection>,
) -> HandlerResult<Vec<Measurement>> {
    let query = params(query)?.into_query()?;
    let rows = services::list_measurements(state.repository.as_ref(), &query).await?;
    Ok(Json(rows))
}

/// GET /measurements/timeseries
///
/// 404 when the window holds no readings for the pair.
pub async fn measurements_timeseries(
    State(state): State<AppState>,
    query: Result<Query<TimeseriesParams>, QueryRejection>,
) -> HandlerResult<Vec<TimePoint>> {
    let request = params(query)?.into_request()?;
    let points = services::measurements_timeseries(
        state.repository.as_ref(),
        &request.station_id,
        &request.pollutant,
        request.hours,
    )
    .await?;
    Ok(Json(points))
}

// =============================================================================
// Stations
// =============================================================================

/// GET /stations
pub async fn list_stations(
    State(state): State<AppState>,
    query: Result<Query<StationsParams>, QueryRejection>,
) -> HandlerResult<FeatureCollection> {
    let query = StationQuery::from(params(query)?);
    let collection = services::list_stations(state.repository.as_ref(), &query).await?;
    Ok(Json(collection))
}

/// GET /stations_wkt
pub async fn list_stations_wkt(
    State(state): State<AppState>,
    query: Result<Query<StationsParams>, QueryRejection>,
) -> HandlerResult<Vec<WktStation>> {
    let query = StationQuery::from(params(query)?);
    let stations = services::list_stations_wkt(state.repository.as_ref(), &query).await?;
    Ok(Json(stations))
}
