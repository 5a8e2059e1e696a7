//! Tests for db::factory and configuration loading from the environment.

mod support;

use std::io::Write;
use std::str::FromStr;

use airquality_geoapi::config::{AllowedOrigins, ServerConfig};
use airquality_geoapi::db::factory::{RepositoryFactory, RepositoryType, LOCAL_SEED_PATH_ENV};
use airquality_geoapi::db::repo_config::{RepositoryConfig, REPOSITORY_CONFIG_ENV};
use airquality_geoapi::db::repository::RepositoryError;

const SEED: &str = r#"{
  "stations": [
    {"station_id": "NL01491", "country": "NL", "lat": 52.37, "lon": 4.9}
  ],
  "measurements": [
    {"station_id": "NL01491", "pollutant": "no2", "value": 21.0, "unit": "µg/m³",
     "city": null, "country": "NL", "timestamp": "2024-03-01T10:00:00Z", "source": null}
  ]
}"#;

fn seed_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", SEED).unwrap();
    file
}

#[test]
fn test_repository_type_from_str() {
    assert_eq!(
        RepositoryType::from_str("POSTGRES").unwrap(),
        RepositoryType::Postgres
    );
    assert_eq!(
        RepositoryType::from_str("memory").unwrap(),
        RepositoryType::Local
    );

    let err = RepositoryType::from_str("mongodb").unwrap_err();
    assert!(err.contains("Unknown repository type"));
}

#[cfg(not(feature = "postgres-repo"))]
#[test]
fn test_repository_type_from_env_default() {
    support::with_scoped_env(&[("REPOSITORY_TYPE", None)], || {
        assert_eq!(RepositoryType::from_env().unwrap(), RepositoryType::Local);
    });
}

#[test]
fn test_repository_type_from_env_invalid() {
    support::with_scoped_env(&[("REPOSITORY_TYPE", Some("cassandra"))], || {
        assert!(RepositoryType::from_env().is_err());
    });
}

#[test]
fn test_create_local_seeded() {
    let file = seed_file();
    let repo = RepositoryFactory::create_local_seeded(file.path()).unwrap();

    let rt = tokio::runtime::Runtime::new().unwrap();
    assert!(rt.block_on(repo.health_check()).unwrap());
}

#[test]
fn test_create_local_seeded_missing_file() {
    let result = RepositoryFactory::create_local_seeded("/nonexistent/seed.json");
    assert!(matches!(
        result,
        Err(RepositoryError::ConfigurationError { .. })
    ));
}

#[test]
fn test_from_env_local_with_seed() {
    let file = seed_file();
    let path = file.path().to_string_lossy().to_string();

    let repo = support::with_scoped_env(
        &[
            (REPOSITORY_CONFIG_ENV, None),
            ("REPOSITORY_TYPE", Some("local")),
            (LOCAL_SEED_PATH_ENV, Some(path.as_str())),
        ],
        || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(RepositoryFactory::from_env())
        },
    )
    .unwrap();

    let rt = tokio::runtime::Runtime::new().unwrap();
    let rows = rt
        .block_on(repo.list_measurements(&Default::default()))
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].station_id, "NL01491");
}

#[test]
fn test_from_env_prefers_config_file() {
    let seed = seed_file();
    let mut config = tempfile::NamedTempFile::new().unwrap();
    write!(
        config,
        "[repository]\ntype = \"local\"\n\n[local]\nseed_path = {:?}\n",
        seed.path().to_string_lossy()
    )
    .unwrap();
    let config_path = config.path().to_string_lossy().to_string();

    let repo = support::with_scoped_env(
        &[
            (REPOSITORY_CONFIG_ENV, Some(config_path.as_str())),
            ("REPOSITORY_TYPE", Some("postgres")),
        ],
        || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(RepositoryFactory::from_env())
        },
    )
    .unwrap();

    let rt = tokio::runtime::Runtime::new().unwrap();
    let rows = rt
        .block_on(repo.list_measurements(&Default::default()))
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[test]
fn test_repository_config_from_missing_file() {
    let result = RepositoryConfig::from_file("/nonexistent/repository.toml");
    assert!(matches!(
        result,
        Err(RepositoryError::ConfigurationError { .. })
    ));
}

#[test]
fn test_server_config_defaults() {
    let config = support::with_scoped_env(
        &[
            ("HOST", None),
            ("PORT", None),
            ("ALLOWED_ORIGINS", None),
            ("REQUEST_TIMEOUT_SECS", None),
        ],
        ServerConfig::from_env,
    )
    .unwrap();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 8000);
    assert_eq!(config.allowed_origins, AllowedOrigins::Any);
    assert_eq!(config.request_timeout.as_secs(), 30);
}

#[test]
fn test_server_config_from_env() {
    let config = support::with_scoped_env(
        &[
            ("HOST", Some("127.0.0.1")),
            ("PORT", Some("9100")),
            ("ALLOWED_ORIGINS", Some("http://localhost:3000, https://maps.example.org,")),
            ("REQUEST_TIMEOUT_SECS", Some("5")),
        ],
        ServerConfig::from_env,
    )
    .unwrap();

    assert_eq!(config.bind_address(), "127.0.0.1:9100");
    assert_eq!(
        config.allowed_origins,
        AllowedOrigins::List(vec![
            "http://localhost:3000".to_string(),
            "https://maps.example.org".to_string(),
        ])
    );
    assert_eq!(config.request_timeout.as_secs(), 5);
}

#[test]
fn test_server_config_invalid_port() {
    let result = support::with_scoped_env(&[("PORT", Some("eighty"))], ServerConfig::from_env);
    assert!(result.is_err());
}
