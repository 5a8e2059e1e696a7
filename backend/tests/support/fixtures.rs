use airquality_geoapi::db::repositories::LocalRepository;
use airquality_geoapi::models::{Measurement, Station};
use chrono::{DateTime, Duration, TimeZone, Utc};

pub fn ts(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
}

pub fn station(id: &str, country: &str, lat: Option<f64>, lon: Option<f64>) -> Station {
    Station {
        station_id: id.to_string(),
        source: Some("eea".to_string()),
        country: Some(country.to_string()),
        city: Some("Amsterdam".to_string()),
        location_name: Some(format!("{} street", id)),
        lat,
        lon,
    }
}

pub fn measurement(
    station_id: &str,
    country: &str,
    pollutant: &str,
    value: f64,
    at: DateTime<Utc>,
) -> Measurement {
    Measurement {
        station_id: station_id.to_string(),
        pollutant: pollutant.to_string(),
        value: Some(value),
        unit: Some("µg/m³".to_string()),
        city: Some("Amsterdam".to_string()),
        location_name: None,
        lat: None,
        lon: None,
        country: Some(country.to_string()),
        timestamp: at,
        source: Some("eea".to_string()),
    }
}

/// Two Dutch stations with coordinates, one German station, and one Dutch
/// station without coordinates.
///
/// NL01491 reports no2 and pm25; its pm25 reading at 11:00 is the newest.
pub fn seeded_repository() -> LocalRepository {
    let repo = LocalRepository::new();
    repo.insert_station(station("NL01491", "NL", Some(52.37), Some(4.9)));
    repo.insert_station(station("NL01908", "NL", Some(52.0), Some(5.0)));
    repo.insert_station(station("DEBE065", "DE", Some(52.52), Some(13.4)));
    repo.insert_station(station("NL00000", "NL", None, None));

    repo.insert_measurement(measurement("NL01491", "NL", "no2", 18.0, ts(2024, 3, 1, 9)));
    repo.insert_measurement(measurement("NL01491", "NL", "no2", 21.0, ts(2024, 3, 1, 10)));
    repo.insert_measurement(measurement("NL01491", "NL", "pm25", 7.5, ts(2024, 3, 1, 11)));
    repo.insert_measurement(measurement("NL01908", "NL", "no2", 30.0, ts(2024, 3, 1, 8)));
    repo.insert_measurement(measurement("DEBE065", "DE", "o3", 40.0, ts(2024, 3, 1, 10)));
    repo.insert_measurement(measurement("NL00000", "NL", "no2", 12.0, ts(2024, 3, 1, 12)));
    repo
}

/// A repository holding `NL01491/pm25` readings 1, 5 and 30 hours before now.
pub fn recent_repository() -> LocalRepository {
    let now = Utc::now();
    let repo = LocalRepository::new();
    repo.insert_station(station("NL01491", "NL", Some(52.37), Some(4.9)));
    for (hours_ago, value) in [(30, 10.0), (5, 14.0), (1, 16.0)] {
        repo.insert_measurement(measurement(
            "NL01491",
            "NL",
            "pm25",
            value,
            now - Duration::hours(hours_ago),
        ));
    }
    repo
}
