use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::{Float8, Nullable, Text, Timestamptz};

use super::schema::measurements;
use crate::models::{Measurement, Station, StationReading, TimePoint};

#[derive(Debug, Clone, QueryableByName)]
#[diesel(table_name = measurements)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MeasurementRow {
    pub station_id: String,
    pub pollutant: String,
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub city: Option<String>,
    pub location_name: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub country: Option<String>,
    pub ts: DateTime<Utc>,
    pub source: Option<String>,
}

impl From<MeasurementRow> for Measurement {
    fn from(row: MeasurementRow) -> Self {
        Self {
            station_id: row.station_id,
            pollutant: row.pollutant,
            value: row.value,
            unit: row.unit,
            city: row.city,
            location_name: row.location_name,
            lat: row.lat,
            lon: row.lon,
            country: row.country,
            timestamp: row.ts,
            source: row.source,
        }
    }
}

#[derive(Debug, Clone, QueryableByName)]
#[diesel(table_name = measurements)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TimePointRow {
    pub station_id: String,
    pub pollutant: String,
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub location_name: Option<String>,
    pub ts: DateTime<Utc>,
    pub source: Option<String>,
}

impl From<TimePointRow> for TimePoint {
    fn from(row: TimePointRow) -> Self {
        Self {
            station_id: row.station_id,
            pollutant: row.pollutant,
            value: row.value,
            unit: row.unit,
            country: row.country,
            city: row.city,
            location_name: row.location_name,
            timestamp: row.ts,
            source: row.source,
        }
    }
}

/// Station metadata joined with its latest measurement. Columns come from
/// both tables, so each field names its SQL type explicitly.
#[derive(Debug, Clone, QueryableByName)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StationReadingRow {
    #[diesel(sql_type = Text)]
    pub station_id: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub source: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub country: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub city: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub location_name: Option<String>,
    #[diesel(sql_type = Nullable<Float8>)]
    pub lat: Option<f64>,
    #[diesel(sql_type = Nullable<Float8>)]
    pub lon: Option<f64>,
    #[diesel(sql_type = Text)]
    pub pollutant: String,
    #[diesel(sql_type = Nullable<Float8>)]
    pub value: Option<f64>,
    #[diesel(sql_type = Nullable<Text>)]
    pub unit: Option<String>,
    #[diesel(sql_type = Timestamptz)]
    pub ts: DateTime<Utc>,
}

impl From<StationReadingRow> for StationReading {
    fn from(row: StationReadingRow) -> Self {
        Self {
            station: Station {
                station_id: row.station_id,
                source: row.source,
                country: row.country,
                city: row.city,
                location_name: row.location_name,
                lat: row.lat,
                lon: row.lon,
            },
            pollutant: row.pollutant,
            value: row.value,
            unit: row.unit,
            timestamp: row.ts,
        }
    }
}
