//! Service layer between the HTTP handlers and the repositories.
//!
//! Services call the repository and shape its rows into response types:
//! GeoJSON features, grouped WKT stations, and the not-found rule for empty
//! time series.

pub mod measurements;
pub mod stations;

#[cfg(test)]
mod stations_tests;

pub use measurements::{
    list_measurements, measurements_timeseries, measurements_timeseries_at,
    NO_TIMESERIES_MESSAGE,
};
pub use stations::{
    group_wkt_stations, list_stations, list_stations_wkt, readings_to_feature_collection,
};
