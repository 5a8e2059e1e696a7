use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped pollutant reading at a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub station_id: String,
    /// Pollutant code, e.g. `pm25`, `no2`, `o3`.
    pub pollutant: String,
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub city: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    pub country: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub source: Option<String>,
}

/// A measurement projected for time-series responses (no coordinates).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub station_id: String,
    pub pollutant: String,
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub source: Option<String>,
}

impl From<Measurement> for TimePoint {
    fn from(m: Measurement) -> Self {
        Self {
            station_id: m.station_id,
            pollutant: m.pollutant,
            value: m.value,
            unit: m.unit,
            country: m.country,
            city: m.city,
            location_name: m.location_name,
            timestamp: m.timestamp,
            source: m.source,
        }
    }
}

/// Static reference data for a monitoring station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub station_id: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

impl Station {
    /// `(lon, lat)` when both coordinates are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lon, self.lat) {
            (Some(lon), Some(lat)) => Some((lon, lat)),
            _ => None,
        }
    }
}

/// Station metadata joined with a single latest reading.
///
/// Repositories return these for both station snapshot endpoints; whether
/// there is one per station or one per station and pollutant depends on the
/// ranking key used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationReading {
    pub station: Station,
    pub pollutant: String,
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub timestamp: DateTime<Utc>,
}
