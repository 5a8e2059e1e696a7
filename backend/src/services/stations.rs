//! Station snapshots rendered as GeoJSON and WKT.

use std::collections::BTreeMap;

use crate::db::query::{LatestBy, StationQuery};
use crate::db::repository::{FullRepository, RepositoryResult};
use crate::models::{
    iso_timestamp, wkt_point, Feature, FeatureCollection, PointGeometry, StationProperties,
    StationReading, WktMeasurement, WktStation,
};

/// One feature per station carrying its most recent reading.
pub async fn list_stations(
    repo: &dyn FullRepository,
    query: &StationQuery,
) -> RepositoryResult<FeatureCollection> {
    let readings = repo.latest_station_readings(query, LatestBy::Station).await?;
    Ok(readings_to_feature_collection(readings))
}

/// One WKT entry per station with the latest reading of every pollutant.
pub async fn list_stations_wkt(
    repo: &dyn FullRepository,
    query: &StationQuery,
) -> RepositoryResult<Vec<WktStation>> {
    let readings = repo
        .latest_station_readings(query, LatestBy::StationPollutant)
        .await?;
    Ok(group_wkt_stations(readings))
}

/// Build a FeatureCollection, dropping readings whose station lacks
/// coordinates.
pub fn readings_to_feature_collection(readings: Vec<StationReading>) -> FeatureCollection {
    let features = readings
        .into_iter()
        .filter_map(|reading| {
            let (lon, lat) = reading.station.coordinates()?;
            let properties = StationProperties {
                station_id: reading.station.station_id,
                source: reading.station.source,
                country: reading.station.country,
                city: reading.station.city,
                location_name: reading.station.location_name,
                pollutant: reading.pollutant,
                value: reading.value,
                unit: reading.unit,
                timestamp: iso_timestamp(&reading.timestamp),
            };
            Some(Feature::new(PointGeometry::new(lon, lat), properties))
        })
        .collect();

    FeatureCollection::new(features)
}

/// Group per-pollutant readings by station. Stations come out ordered by id
/// and each station's measurements by pollutant code.
pub fn group_wkt_stations(readings: Vec<StationReading>) -> Vec<WktStation> {
    let mut stations: BTreeMap<String, WktStation> = BTreeMap::new();

    for reading in readings {
        let Some((lon, lat)) = reading.station.coordinates() else {
            continue;
        };
        let measurement = WktMeasurement {
            pollutant: reading.pollutant,
            value: reading.value,
            unit: reading.unit,
            timestamp: iso_timestamp(&reading.timestamp),
        };
        let station = reading.station;
        stations
            .entry(station.station_id.clone())
            .or_insert_with(|| WktStation {
                wkt: wkt_point(lon, lat),
                station_id: station.station_id,
                source: station.source,
                country: station.country,
                city: station.city,
                location_name: station.location_name,
                measurements: Vec::new(),
            })
            .measurements
            .push(measurement);
    }

    stations
        .into_values()
        .map(|mut station| {
            station
                .measurements
                .sort_by(|a, b| a.pollutant.cmp(&b.pollutant));
            station
        })
        .collect()
}
