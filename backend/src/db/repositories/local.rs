//! In-memory local repository implementation.
//!
//! Stores stations and measurements in memory and answers every query with
//! the same filtering, ranking and ordering rules as the SQL statements in
//! [`crate::db::query`]. Used by the test suite and for local development.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use crate::db::query::{LatestBy, MeasurementQuery, StationQuery, TimeseriesQuery};
use crate::db::repository::*;
use crate::models::{Measurement, Station, StationReading, TimePoint};

/// In-memory local repository.
///
/// # Example
/// ```
/// use airquality_geoapi::db::repositories::LocalRepository;
/// use airquality_geoapi::models::Station;
///
/// let repo = LocalRepository::new();
/// repo.insert_station(Station {
///     station_id: "NL01491".to_string(),
///     source: None,
///     country: Some("NL".to_string()),
///     city: None,
///     location_name: None,
///     lat: Some(52.37),
///     lon: Some(4.9),
/// });
/// assert_eq!(repo.station_count(), 1);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    stations: BTreeMap<String, Station>,
    measurements: Vec<Measurement>,
    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            stations: BTreeMap::new(),
            measurements: Vec::new(),
            is_healthy: true,
        }
    }
}

/// Seed document accepted by [`LocalRepository::from_json_file`].
#[derive(Debug, Default, Deserialize)]
pub struct LocalSeed {
    #[serde(default)]
    pub stations: Vec<Station>,
    #[serde(default)]
    pub measurements: Vec<Measurement>,
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Create a repository pre-populated from a seed document.
    pub fn from_seed(seed: LocalSeed) -> Self {
        let repo = Self::new();
        {
            let mut data = repo.data.write();
            for station in seed.stations {
                data.stations.insert(station.station_id.clone(), station);
            }
            data.measurements = seed.measurements;
        }
        repo
    }

    /// Load a `{"stations": [...], "measurements": [...]}` JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to read seed file {}: {}",
                path.display(),
                e
            ))
        })?;
        let seed: LocalSeed = serde_json::from_str(&content).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to parse seed file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self::from_seed(seed))
    }

    /// Insert or replace a station.
    pub fn insert_station(&self, station: Station) {
        self.data
            .write()
            .stations
            .insert(station.station_id.clone(), station);
    }

    /// Append a measurement.
    pub fn insert_measurement(&self, measurement: Measurement) {
        self.data.write().measurements.push(measurement);
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    pub fn station_count(&self) -> usize {
        self.data.read().stations.len()
    }

    pub fn measurement_count(&self) -> usize {
        self.data.read().measurements.len()
    }

    fn check_health(&self, operation: &str) -> RepositoryResult<()> {
        if self.data.read().is_healthy {
            Ok(())
        } else {
            Err(RepositoryError::connection_with_context(
                "Local repository is marked unhealthy",
                ErrorContext::new(operation),
            ))
        }
    }
}

/// Newest first; ties broken by station id then pollutant.
fn newest_first(a: &Measurement, b: &Measurement) -> std::cmp::Ordering {
    b.timestamp
        .cmp(&a.timestamp)
        .then_with(|| a.station_id.cmp(&b.station_id))
        .then_with(|| a.pollutant.cmp(&b.pollutant))
}

/// Keep the most recent measurement per key. On equal timestamps the one
/// that sorts first by `newest_first` wins.
fn latest_by_key<'a, K, F>(
    rows: impl Iterator<Item = &'a Measurement>,
    key: F,
) -> Vec<&'a Measurement>
where
    K: std::hash::Hash + Eq,
    F: Fn(&Measurement) -> K,
{
    let mut latest: HashMap<K, &Measurement> = HashMap::new();
    for row in rows {
        latest
            .entry(key(row))
            .and_modify(|current| {
                if newest_first(row, *current).is_lt() {
                    *current = row;
                }
            })
            .or_insert(row);
    }
    latest.into_values().collect()
}

#[async_trait]
impl MeasurementRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.check_health("health_check")?;
        Ok(true)
    }

    async fn list_measurements(
        &self,
        query: &MeasurementQuery,
    ) -> RepositoryResult<Vec<Measurement>> {
        self.check_health("list_measurements")?;
        let predicates = query.predicates();
        let data = self.data.read();

        let filtered = data
            .measurements
            .iter()
            .filter(|m| predicates.iter().all(|p| p.matches_measurement(m)));

        let mut rows: Vec<&Measurement> = if query.latest_per_station {
            latest_by_key(filtered, |m| (m.station_id.clone(), m.pollutant.clone()))
        } else {
            filtered.collect()
        };
        rows.sort_by(|a, b| newest_first(a, b));

        Ok(rows
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .cloned()
            .collect())
    }

    async fn measurements_timeseries(
        &self,
        query: &TimeseriesQuery,
    ) -> RepositoryResult<Vec<TimePoint>> {
        self.check_health("measurements_timeseries")?;
        let predicates = query.predicates();
        let data = self.data.read();

        let mut rows: Vec<&Measurement> = data
            .measurements
            .iter()
            .filter(|m| predicates.iter().all(|p| p.matches_measurement(m)))
            .collect();
        rows.sort_by_key(|m| m.timestamp);

        Ok(rows.into_iter().cloned().map(TimePoint::from).collect())
    }
}

#[async_trait]
impl StationRepository for LocalRepository {
    async fn latest_station_readings(
        &self,
        query: &StationQuery,
        by: LatestBy,
    ) -> RepositoryResult<Vec<StationReading>> {
        self.check_health("latest_station_readings")?;
        let measurement_predicates = query.measurement_predicates();
        let country = query.station_predicates();
        let data = self.data.read();

        let filtered = data
            .measurements
            .iter()
            .filter(|m| measurement_predicates.iter().all(|p| p.matches_measurement(m)));

        let latest = match by {
            LatestBy::Station => latest_by_key(filtered, |m| m.station_id.clone()),
            LatestBy::StationPollutant => {
                latest_by_key(filtered, |m| (m.station_id.clone(), m.pollutant.clone()))
            }
        };

        let mut readings: Vec<StationReading> = latest
            .into_iter()
            .filter_map(|m| {
                let station = data.stations.get(&m.station_id)?;
                station.coordinates()?;
                let country_ok = country.iter().all(|p| p.matches_station(station));
                country_ok.then(|| StationReading {
                    station: station.clone(),
                    pollutant: m.pollutant.clone(),
                    value: m.value,
                    unit: m.unit.clone(),
                    timestamp: m.timestamp,
                })
            })
            .collect();

        readings.sort_by(|a, b| {
            a.station
                .station_id
                .cmp(&b.station.station_id)
                .then_with(|| a.pollutant.cmp(&b.pollutant))
        });
        Ok(readings)
    }
}
