//! # Air Quality GeoAPI
//!
//! Read-only HTTP API over a store of air-quality measurements collected by
//! monitoring stations.
//!
//! ## Endpoints
//!
//! - `GET /health`: liveness
//! - `GET /health/db`: datastore reachability
//! - `GET /measurements`: filtered, paginated readings, newest first
//! - `GET /measurements/timeseries`: one station/pollutant over the last N hours
//! - `GET /stations`: latest reading per station as a GeoJSON FeatureCollection
//! - `GET /stations_wkt`: latest reading per station and pollutant, with a WKT point
//!
//! ## Architecture
//!
//! - [`models`]: measurement, station and GeoJSON/WKT response types
//! - [`db`]: query construction, repository traits, Postgres and in-memory backends
//! - [`services`]: shaping repository rows into responses
//! - [`config`]: server settings from the environment
//! - [`http`]: axum router, handlers and error mapping

// RepositoryError carries context for debugging
#![allow(clippy::result_large_err)]

pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
