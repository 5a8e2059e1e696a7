//! Repository trait definitions for the measurement store.
//!
//! The store is read through two focused traits:
//!
//! - [`MeasurementRepository`]: health, measurement listings and time series
//! - [`StationRepository`]: latest readings joined to station metadata
//!
//! Handlers and services take the [`FullRepository`] bound, which is
//! implemented for anything implementing both.

pub mod error;
pub mod measurement;
pub mod station;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

pub use measurement::MeasurementRepository;
pub use station::StationRepository;

/// Composite trait bound for a complete repository implementation.
pub trait FullRepository: MeasurementRepository + StationRepository {}

impl<T> FullRepository for T where T: MeasurementRepository + StationRepository {}
