//! Service-layer tests against the in-memory repository.

mod support;

use airquality_geoapi::db::query::{MeasurementQuery, StationQuery};
use airquality_geoapi::db::repository::RepositoryError;
use airquality_geoapi::services;
use support::fixtures::{seeded_repository, ts};

#[tokio::test]
async fn test_timeseries_at_fixed_now() {
    let repo = seeded_repository();

    // 12:00 minus 2 hours keeps the 10:00 reading but not 09:00.
    let points =
        services::measurements_timeseries_at(&repo, "NL01491", "no2", 2, ts(2024, 3, 1, 12))
            .await
            .unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].value, Some(21.0));
}

#[tokio::test]
async fn test_timeseries_at_empty_window_is_not_found() {
    let repo = seeded_repository();

    let err = services::measurements_timeseries_at(&repo, "NL01491", "no2", 1, ts(2024, 3, 2, 0))
        .await
        .unwrap_err();
    match err {
        RepositoryError::NotFound { message, context } => {
            assert_eq!(message, services::NO_TIMESERIES_MESSAGE);
            assert_eq!(context.operation.as_deref(), Some("measurements_timeseries"));
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_timeseries_datastore_failure_is_not_not_found() {
    let repo = seeded_repository();
    repo.set_healthy(false);

    let err = services::measurements_timeseries(&repo, "NL01491", "no2", 24)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ConnectionError { .. }));
}

#[tokio::test]
async fn test_list_measurements_passes_query_through() {
    let repo = seeded_repository();
    let query = MeasurementQuery {
        country: Some("DE".to_string()),
        ..Default::default()
    };

    let rows = services::list_measurements(&repo, &query).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].pollutant, "o3");
}

#[tokio::test]
async fn test_list_stations_and_wkt_agree_on_station_set() {
    let repo = seeded_repository();
    let query = StationQuery::default();

    let collection = services::list_stations(&repo, &query).await.unwrap();
    let wkt = services::list_stations_wkt(&repo, &query).await.unwrap();

    let geo_ids: Vec<&str> = collection
        .features
        .iter()
        .map(|f| f.properties.station_id.as_str())
        .collect();
    let wkt_ids: Vec<&str> = wkt.iter().map(|s| s.station_id.as_str()).collect();
    assert_eq!(geo_ids, wkt_ids);
}
