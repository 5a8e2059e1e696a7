//! Query-string and response types for the HTTP API.
//!
//! Query parameters are deserialized as optional raw strings and then parsed
//! and validated into the typed queries the repositories take. Every parse or
//! range failure therefore names the offending field. An empty value counts
//! as absent.

use serde::{Deserialize, Serialize};

use super::error::AppError;
use crate::db::query::{
    MeasurementQuery, StationQuery, DEFAULT_HOURS, DEFAULT_LIMIT, MAX_HOURS, MAX_LIMIT,
};

/// `GET /measurements` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeasurementsParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub station_id: Option<String>,
    pub country: Option<String>,
    pub pollutant: Option<String>,
    pub latest_per_station: Option<String>,
}

impl MeasurementsParams {
    pub fn into_query(self) -> Result<MeasurementQuery, AppError> {
        let limit = bounded("limit", self.limit.as_deref(), 1, i64::from(MAX_LIMIT))?
            .unwrap_or(DEFAULT_LIMIT);
        let offset = bounded("offset", self.offset.as_deref(), 0, i64::from(u32::MAX))?
            .unwrap_or(0);
        let latest_per_station =
            flag("latest_per_station", self.latest_per_station.as_deref())?.unwrap_or(false);

        Ok(MeasurementQuery {
            limit,
            offset,
            station_id: self.station_id,
            country: self.country,
            pollutant: self.pollutant,
            latest_per_station,
        })
    }
}

/// `GET /measurements/timeseries` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeseriesParams {
    pub station_id: Option<String>,
    pub pollutant: Option<String>,
    pub hours: Option<String>,
}

/// Validated time series request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeseriesRequest {
    pub station_id: String,
    pub pollutant: String,
    pub hours: u32,
}

impl TimeseriesParams {
    pub fn into_request(self) -> Result<TimeseriesRequest, AppError> {
        let station_id = required("station_id", self.station_id)?;
        let pollutant = required("pollutant", self.pollutant)?;
        let hours = bounded("hours", self.hours.as_deref(), 1, i64::from(MAX_HOURS))?
            .unwrap_or(DEFAULT_HOURS);

        Ok(TimeseriesRequest {
            station_id,
            pollutant,
            hours,
        })
    }
}

/// `GET /stations` and `GET /stations_wkt` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationsParams {
    pub country: Option<String>,
    pub pollutant: Option<String>,
}

impl From<StationsParams> for StationQuery {
    fn from(params: StationsParams) -> Self {
        StationQuery {
            country: params.country,
            pollutant: params.pollutant,
        }
    }
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Datastore readiness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbHealthResponse {
    pub status: String,
    pub database: String,
}

fn required(field: &str, value: Option<String>) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::validation(field, format!("{} is required", field))),
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn bounded(field: &str, value: Option<&str>, min: i64, max: i64) -> Result<Option<u32>, AppError> {
    let Some(raw) = present(value) else {
        return Ok(None);
    };
    let v: i64 = raw.parse().map_err(|_| {
        AppError::validation(field, format!("{} must be an integer, got '{}'", field, raw))
    })?;
    if v < min || v > max {
        return Err(AppError::validation(
            field,
            format!("{} must be between {} and {}, got {}", field, min, max, v),
        ));
    }
    u32::try_from(v)
        .map(Some)
        .map_err(|_| AppError::validation(field, format!("{} is out of range", field)))
}

/// Boolean query flag. Accepts the usual spellings case-insensitively:
/// true/false, t/f, yes/no, y/n, on/off, 1/0.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "on" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn flag(field: &str, value: Option<&str>) -> Result<Option<bool>, AppError> {
    let Some(raw) = present(value) else {
        return Ok(None);
    };
    parse_flag(raw).map(Some).ok_or_else(|| {
        AppError::validation(field, format!("{} must be a boolean, got '{}'", field, raw))
    })
}
