//! Measurement listings and time series.

use chrono::{DateTime, Duration, Utc};

use crate::db::query::{MeasurementQuery, TimeseriesQuery};
use crate::db::repository::{
    ErrorContext, FullRepository, RepositoryError, RepositoryResult,
};
use crate::models::{Measurement, TimePoint};

/// Detail returned when a time series has no rows.
pub const NO_TIMESERIES_MESSAGE: &str = "No measurements for given station/pollutant";

/// Newest-first listing, honoring `latest_per_station`.
pub async fn list_measurements(
    repo: &dyn FullRepository,
    query: &MeasurementQuery,
) -> RepositoryResult<Vec<Measurement>> {
    repo.list_measurements(query).await
}

/// Readings for one station/pollutant over the last `hours` hours.
pub async fn measurements_timeseries(
    repo: &dyn FullRepository,
    station_id: &str,
    pollutant: &str,
    hours: u32,
) -> RepositoryResult<Vec<TimePoint>> {
    measurements_timeseries_at(repo, station_id, pollutant, hours, Utc::now()).await
}

/// Same as [`measurements_timeseries`] with an explicit "now".
///
/// An empty window is reported as [`RepositoryError::NotFound`] so callers
/// can tell "no data" apart from a datastore that could not be reached.
pub async fn measurements_timeseries_at(
    repo: &dyn FullRepository,
    station_id: &str,
    pollutant: &str,
    hours: u32,
    now: DateTime<Utc>,
) -> RepositoryResult<Vec<TimePoint>> {
    let query = TimeseriesQuery {
        station_id: station_id.to_string(),
        pollutant: pollutant.to_string(),
        since: now - Duration::hours(i64::from(hours)),
    };

    let points = repo.measurements_timeseries(&query).await?;
    if points.is_empty() {
        return Err(RepositoryError::not_found_with_context(
            NO_TIMESERIES_MESSAGE,
            ErrorContext::new("measurements_timeseries")
                .with_entity("measurement")
                .with_details(format!(
                    "station_id={}, pollutant={}, hours={}",
                    station_id, pollutant, hours
                )),
        ));
    }
    Ok(points)
}
