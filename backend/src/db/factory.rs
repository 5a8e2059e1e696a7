//! Repository factory for dependency injection.
//!
//! Chooses and builds the repository backend from environment variables or
//! a [`RepositoryConfig`] file.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use super::repo_config::RepositoryConfig;
use super::repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
use super::repositories::PostgresRepository;
use super::repository::{FullRepository, RepositoryError, RepositoryResult};
use super::PostgresConfig;

/// Environment variable naming a JSON seed file for the local backend.
pub const LOCAL_SEED_PATH_ENV: &str = "LOCAL_SEED_PATH";

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Postgres + Diesel implementation
    Postgres,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string ("postgres", "pg", "local").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variable.
    ///
    /// Reads `REPOSITORY_TYPE`. Without it, Postgres is selected whenever the
    /// `postgres-repo` feature is compiled in, otherwise Local.
    pub fn from_env() -> Result<Self, String> {
        match std::env::var("REPOSITORY_TYPE") {
            Ok(val) if !val.trim().is_empty() => val.parse(),
            _ => Ok(Self::compiled_default()),
        }
    }

    fn compiled_default() -> Self {
        if cfg!(feature = "postgres-repo") {
            Self::Postgres
        } else {
            Self::Local
        }
    }
}

/// Repository factory for creating repository instances.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `postgres_config` - Database configuration (required for Postgres)
    pub async fn create(
        repo_type: RepositoryType,
        postgres_config: Option<&PostgresConfig>,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        match repo_type {
            RepositoryType::Postgres => {
                #[cfg(feature = "postgres-repo")]
                {
                    let config = postgres_config.ok_or_else(|| {
                        RepositoryError::configuration(
                            "Postgres repository requires PostgresConfig",
                        )
                    })?;
                    let pg = Self::create_postgres(config)?;
                    Ok(pg as Arc<dyn FullRepository>)
                }
                #[cfg(not(feature = "postgres-repo"))]
                {
                    let _ = postgres_config;
                    Err(RepositoryError::configuration(
                        "Postgres repository feature not enabled",
                    ))
                }
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create a Postgres repository.
    #[cfg(feature = "postgres-repo")]
    pub fn create_postgres(config: &PostgresConfig) -> RepositoryResult<Arc<PostgresRepository>> {
        info!(url = %config.redacted_url(), pool_max = config.max_pool_size, "creating postgres repository");
        let repo = PostgresRepository::new(config.clone())?;
        Ok(Arc::new(repo))
    }

    /// Create an empty in-memory local repository.
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create an in-memory repository seeded from a JSON file.
    pub fn create_local_seeded<P: AsRef<Path>>(
        seed_path: P,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo = LocalRepository::from_json_file(seed_path.as_ref())?;
        info!(
            path = %seed_path.as_ref().display(),
            stations = repo.station_count(),
            measurements = repo.measurement_count(),
            "seeded local repository"
        );
        Ok(Arc::new(repo))
    }

    fn create_local_from(seed_path: Option<&Path>) -> RepositoryResult<Arc<dyn FullRepository>> {
        match seed_path {
            Some(path) => Self::create_local_seeded(path),
            None => Ok(Self::create_local()),
        }
    }

    /// Create repository from environment configuration.
    ///
    /// When `REPOSITORY_CONFIG` names a TOML file it takes precedence;
    /// otherwise `REPOSITORY_TYPE`, the `POSTGRES_*` variables and
    /// `LOCAL_SEED_PATH` are used.
    pub async fn from_env() -> RepositoryResult<Arc<dyn FullRepository>> {
        if let Some(config) = RepositoryConfig::from_env_path()? {
            return Self::from_repository_config(&config).await;
        }

        let repo_type = RepositoryType::from_env().map_err(RepositoryError::configuration)?;

        match repo_type {
            RepositoryType::Postgres => {
                #[cfg(feature = "postgres-repo")]
                {
                    let config =
                        PostgresConfig::from_env().map_err(RepositoryError::configuration)?;
                    let pg = Self::create_postgres(&config)?;
                    Ok(pg as Arc<dyn FullRepository>)
                }
                #[cfg(not(feature = "postgres-repo"))]
                {
                    Err(RepositoryError::configuration(
                        "Postgres repository feature not enabled",
                    ))
                }
            }
            RepositoryType::Local => {
                let seed = std::env::var(LOCAL_SEED_PATH_ENV)
                    .ok()
                    .filter(|p| !p.trim().is_empty());
                Self::create_local_from(seed.as_deref().map(Path::new))
            }
        }
    }

    /// Create repository from a TOML configuration file.
    pub async fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let config = RepositoryConfig::from_file(config_path)?;
        Self::from_repository_config(&config).await
    }

    async fn from_repository_config(
        config: &RepositoryConfig,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        match repo_type {
            RepositoryType::Postgres => {
                let pg_config = config.to_postgres_config()?;
                Self::create(RepositoryType::Postgres, pg_config.as_ref()).await
            }
            RepositoryType::Local => Self::create_local_from(config.local.seed_path.as_deref()),
        }
    }
}

/// Builder for configuring repository creation.
///
/// # Example
/// ```ignore
/// use airquality_geoapi::db::{PostgresConfig, RepositoryBuilder, RepositoryType};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Requires the `postgres-repo` feature.
///     let repo = RepositoryBuilder::new()
///         .repository_type(RepositoryType::Postgres)
///         .postgres_config(PostgresConfig::from_env()?)
///         .build()
///         .await?;
///     Ok(())
/// }
/// ```
pub struct RepositoryBuilder {
    repo_type: RepositoryType,
    #[cfg(feature = "postgres-repo")]
    postgres_config: Option<PostgresConfig>,
}

impl RepositoryBuilder {
    /// Create a new repository builder defaulting to the compiled-in backend.
    pub fn new() -> Self {
        Self {
            repo_type: RepositoryType::compiled_default(),
            #[cfg(feature = "postgres-repo")]
            postgres_config: None,
        }
    }

    /// Set the repository type.
    pub fn repository_type(mut self, repo_type: RepositoryType) -> Self {
        self.repo_type = repo_type;
        self
    }

    /// Set the Postgres configuration.
    #[cfg(feature = "postgres-repo")]
    pub fn postgres_config(mut self, config: PostgresConfig) -> Self {
        self.postgres_config = Some(config);
        self
    }

    /// Build the repository instance.
    pub async fn build(self) -> RepositoryResult<Arc<dyn FullRepository>> {
        #[cfg(feature = "postgres-repo")]
        let pg_config = self.postgres_config.as_ref();
        #[cfg(not(feature = "postgres-repo"))]
        let pg_config = None;

        RepositoryFactory::create(self.repo_type, pg_config).await
    }
}

impl Default for RepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
