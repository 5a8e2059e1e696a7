//! Measurement queries: filtered listings and per-station time series.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::db::query::{MeasurementQuery, TimeseriesQuery};
use crate::models::{Measurement, TimePoint};

/// Read access to the `measurements` table.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to be shared across handlers.
#[async_trait]
pub trait MeasurementRepository: Send + Sync {
    /// Check if the datastore is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if a trivial statement succeeded
    /// - `Err(RepositoryError)` if the connection or statement failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// List measurements newest first, paginated by `limit`/`offset`.
    ///
    /// Only the filters present on `query` are applied. When
    /// `latest_per_station` is set the rows are first reduced to the most
    /// recent one per (station, pollutant).
    async fn list_measurements(&self, query: &MeasurementQuery)
        -> RepositoryResult<Vec<Measurement>>;

    /// All readings for one station/pollutant pair at or after
    /// `query.since`, oldest first. An empty vector is a valid result here;
    /// the service layer decides what "no data" means.
    async fn measurements_timeseries(
        &self,
        query: &TimeseriesQuery,
    ) -> RepositoryResult<Vec<TimePoint>>;
}
