//! Database module for the measurement store.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP handlers / services (result shaping)              │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository traits (repository/) - Abstract Interface   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────────────┐
//!     │                                      │
//! ┌───▼──────────────────────┐  ┌────────────▼─────────────┐
//! │  Postgres Repository     │  │  Local Repository        │
//! │  (diesel + r2d2)         │  │  (in-memory)             │
//! └───┬──────────────────────┘  └──────────────────────────┘
//!     │
//! ┌───▼──────────────────────┐
//! │  query: named predicates │
//! │  -> parameterized SQL    │
//! └──────────────────────────┘
//! ```
//!
//! - `query`: filter predicates and SQL statement construction
//! - `repository`: trait definitions and error types
//! - `repositories::postgres`: Postgres implementation with Diesel
//! - `repositories::local`: In-memory implementation for tests and development
//! - `factory`: backend selection from environment or config file

// Feature flag priority: postgres > local
#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod query;
pub mod repo_config;
pub mod repositories;
pub mod repository;

// Postgres config is colocated with the repository implementation.
#[cfg(feature = "postgres-repo")]
pub use repositories::postgres::PostgresConfig;
#[cfg(not(feature = "postgres-repo"))]
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    _private: (),
}

pub use repo_config::RepositoryConfig;

pub use factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
pub use query::{LatestBy, MeasurementQuery, StationQuery, TimeseriesQuery};
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{
    ErrorContext, FullRepository, MeasurementRepository, RepositoryError, RepositoryResult,
    StationRepository,
};
