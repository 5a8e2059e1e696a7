//! Repository configuration file support.
//!
//! Reads the backend selection and connection settings from a TOML file,
//! as an alternative to the environment variables.
//!
//! ```toml
//! [repository]
//! type = "postgres"
//!
//! [postgres]
//! host = "localhost"
//! database = "airquality"
//! max_connections = 20
//!
//! [local]
//! seed_path = "fixtures/stations.json"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::factory::RepositoryType;
use super::repository::RepositoryError;
use crate::db::PostgresConfig;

/// Environment variable pointing at a repository configuration file.
pub const REPOSITORY_CONFIG_ENV: &str = "REPOSITORY_CONFIG";

/// Repository configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub repository: RepositorySettings,
    #[serde(default)]
    pub postgres: PostgresSettings,
    #[serde(default)]
    pub local: LocalSettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type")]
    pub repo_type: String,
}

/// Postgres connection settings. `database_url`, when set, overrides the
/// individual connection fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresSettings {
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default = "default_password")]
    pub password: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout: u64,
    #[serde(default = "default_statement_timeout_ms")]
    pub statement_timeout_ms: u64,
}

impl Default for PostgresSettings {
    fn default() -> Self {
        Self {
            database_url: None,
            host: default_host(),
            port: default_port(),
            database: default_database(),
            user: default_user(),
            password: default_password(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout: default_connect_timeout(),
            idle_timeout: default_idle_timeout(),
            statement_timeout_ms: default_statement_timeout_ms(),
        }
    }
}

/// In-memory repository settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalSettings {
    /// JSON seed document loaded at startup.
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
}

fn default_host() -> String {
    "postgres".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_database() -> String {
    "airquality".to_string()
}

fn default_user() -> String {
    "airuser".to_string()
}

fn default_password() -> String {
    "airpassword".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    600
}

fn default_statement_timeout_ms() -> u64 {
    15_000
}

impl RepositoryConfig {
    /// Load repository configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {}", e))
        })?;

        toml::from_str(&content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Load the file named by `REPOSITORY_CONFIG`, if the variable is set.
    pub fn from_env_path() -> Result<Option<Self>, RepositoryError> {
        match std::env::var(REPOSITORY_CONFIG_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim()).map(Some),
            _ => Ok(None),
        }
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.repository.repo_type)
    }

    /// Convert to PostgresConfig if this is a Postgres configuration.
    #[cfg(feature = "postgres-repo")]
    pub fn to_postgres_config(&self) -> Result<Option<PostgresConfig>, RepositoryError> {
        let repo_type = self.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        if repo_type != RepositoryType::Postgres {
            return Ok(None);
        }

        let pg = &self.postgres;
        let database_url = match pg.database_url.as_deref() {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => PostgresConfig::compose_url(&pg.host, pg.port, &pg.database, &pg.user, &pg.password),
        };

        Ok(Some(PostgresConfig {
            database_url,
            max_pool_size: pg.max_connections,
            min_pool_size: pg.min_connections,
            connection_timeout_sec: pg.connect_timeout,
            idle_timeout_sec: pg.idle_timeout,
            statement_timeout_ms: pg.statement_timeout_ms,
        }))
    }

    /// Convert to PostgresConfig when the feature is disabled.
    #[cfg(not(feature = "postgres-repo"))]
    pub fn to_postgres_config(&self) -> Result<Option<PostgresConfig>, RepositoryError> {
        let repo_type = self.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        if repo_type == RepositoryType::Postgres {
            return Err(RepositoryError::configuration(
                "Postgres repository feature not enabled",
            ));
        }

        Ok(None)
    }
}
