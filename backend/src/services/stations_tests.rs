#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::models::{Station, StationReading};
    use crate::services::stations::{group_wkt_stations, readings_to_feature_collection};

    fn station(id: &str, lat: Option<f64>, lon: Option<f64>) -> Station {
        Station {
            station_id: id.to_string(),
            source: Some("eea".to_string()),
            country: Some("NL".to_string()),
            city: Some("Amsterdam".to_string()),
            location_name: Some(format!("{} street", id)),
            lat,
            lon,
        }
    }

    fn reading(station: Station, pollutant: &str, value: f64, hour: u32) -> StationReading {
        StationReading {
            station,
            pollutant: pollutant.to_string(),
            value: Some(value),
            unit: Some("µg/m³".to_string()),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_feature_collection_uses_lon_lat_order() {
        let fc = readings_to_feature_collection(vec![reading(
            station("NL01491", Some(52.37), Some(4.9)),
            "pm25",
            12.0,
            10,
        )]);

        assert_eq!(fc.kind, "FeatureCollection");
        assert_eq!(fc.features.len(), 1);
        assert_eq!(fc.features[0].geometry.coordinates, [4.9, 52.37]);
        assert_eq!(fc.features[0].properties.pollutant, "pm25");
        assert_eq!(
            fc.features[0].properties.timestamp,
            "2024-03-01T10:00:00+00:00"
        );
    }

    #[test]
    fn test_feature_collection_skips_missing_coordinates() {
        let fc = readings_to_feature_collection(vec![
            reading(station("A", None, Some(4.9)), "pm25", 1.0, 1),
            reading(station("B", Some(52.0), None), "pm25", 1.0, 1),
            reading(station("C", Some(52.0), Some(5.0)), "pm25", 1.0, 1),
        ]);

        assert_eq!(fc.features.len(), 1);
        assert_eq!(fc.features[0].properties.station_id, "C");
    }

    #[test]
    fn test_empty_readings_give_empty_collection() {
        let fc = readings_to_feature_collection(vec![]);
        assert!(fc.features.is_empty());
        let json = serde_json::to_string(&fc).unwrap();
        assert_eq!(json, r#"{"type":"FeatureCollection","features":[]}"#);
    }

    #[test]
    fn test_wkt_groups_pollutants_per_station() {
        let nl = station("NL01491", Some(52.37), Some(4.9));
        let de = station("DEBE010", Some(52.5), Some(13.0));
        let grouped = group_wkt_stations(vec![
            reading(nl.clone(), "pm25", 12.0, 10),
            reading(de.clone(), "o3", 40.0, 9),
            reading(nl.clone(), "no2", 20.0, 8),
        ]);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].station_id, "DEBE010");
        assert_eq!(grouped[0].wkt, "POINT(13.0 52.5)");
        assert_eq!(grouped[1].station_id, "NL01491");
        assert_eq!(grouped[1].wkt, "POINT(4.9 52.37)");

        let pollutants: Vec<&str> = grouped[1]
            .measurements
            .iter()
            .map(|m| m.pollutant.as_str())
            .collect();
        assert_eq!(pollutants, vec!["no2", "pm25"]);
    }

    #[test]
    fn test_wkt_skips_missing_coordinates() {
        let grouped = group_wkt_stations(vec![
            reading(station("A", None, None), "pm25", 1.0, 1),
            reading(station("B", Some(1.5), Some(2.5)), "pm25", 1.0, 1),
        ]);

        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].station_id, "B");
        assert_eq!(grouped[0].wkt, "POINT(2.5 1.5)");
    }
}
