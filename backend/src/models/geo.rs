//! GeoJSON and WKT response shapes for station snapshots.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Render a UTC instant as an ISO-8601 string with an explicit offset.
pub fn iso_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// Format a coordinate the way a float literal reads: integral values keep
/// one decimal place, everything else uses the shortest round-trip form.
pub fn format_coordinate(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// WKT point text, longitude first.
pub fn wkt_point(lon: f64, lat: f64) -> String {
    format!(
        "POINT({} {})",
        format_coordinate(lon),
        format_coordinate(lat)
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: "FeatureCollection".to_string(),
            features,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    pub geometry: PointGeometry,
    pub properties: StationProperties,
}

impl Feature {
    pub fn new(geometry: PointGeometry, properties: StationProperties) -> Self {
        Self {
            kind: "Feature".to_string(),
            geometry,
            properties,
        }
    }
}

/// GeoJSON Point; coordinates are `[lon, lat]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: [f64; 2],
}

impl PointGeometry {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            kind: "Point".to_string(),
            coordinates: [lon, lat],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationProperties {
    pub station_id: String,
    pub source: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub location_name: Option<String>,
    pub pollutant: String,
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub timestamp: String,
}

/// A station rendered as a WKT point with its latest reading per pollutant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WktStation {
    pub wkt: String,
    pub station_id: String,
    pub source: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub location_name: Option<String>,
    pub measurements: Vec<WktMeasurement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WktMeasurement {
    pub pollutant: String,
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_coordinate_integral_keeps_decimal() {
        assert_eq!(format_coordinate(52.0), "52.0");
        assert_eq!(format_coordinate(-3.0), "-3.0");
    }

    #[test]
    fn test_format_coordinate_fractional() {
        assert_eq!(format_coordinate(4.8952), "4.8952");
        assert_eq!(format_coordinate(52.3676), "52.3676");
    }

    #[test]
    fn test_wkt_point_is_lon_first() {
        assert_eq!(wkt_point(4.9, 52.37), "POINT(4.9 52.37)");
    }

    #[test]
    fn test_iso_timestamp_has_offset() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(iso_timestamp(&ts), "2024-03-01T12:00:00+00:00");
    }

    #[test]
    fn test_feature_collection_serializes_geojson_shape() {
        let feature = Feature::new(
            PointGeometry::new(4.9, 52.37),
            StationProperties {
                station_id: "NL01491".to_string(),
                source: Some("eea".to_string()),
                country: Some("NL".to_string()),
                city: Some("Amsterdam".to_string()),
                location_name: None,
                pollutant: "pm25".to_string(),
                value: Some(12.5),
                unit: Some("µg/m³".to_string()),
                timestamp: "2024-03-01T12:00:00+00:00".to_string(),
            },
        );
        let json = serde_json::to_value(FeatureCollection::new(vec![feature])).unwrap();

        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["features"][0]["type"], "Feature");
        assert_eq!(json["features"][0]["geometry"]["type"], "Point");
        assert_eq!(json["features"][0]["geometry"]["coordinates"][0], 4.9);
        assert_eq!(json["features"][0]["geometry"]["coordinates"][1], 52.37);
        assert_eq!(json["features"][0]["properties"]["station_id"], "NL01491");
        assert!(json["features"][0]["properties"]["location_name"].is_null());
    }
}
