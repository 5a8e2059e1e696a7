//! Station snapshot queries.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::db::query::{LatestBy, StationQuery};
use crate::models::StationReading;

#[async_trait]
pub trait StationRepository: Send + Sync {
    /// Latest reading per station (or per station and pollutant, see
    /// [`LatestBy`]) joined to station metadata.
    ///
    /// The pollutant filter narrows measurements before ranking; the country
    /// filter applies to station metadata. Stations without coordinates are
    /// never returned. Results are ordered by station id, then pollutant.
    async fn latest_station_readings(
        &self,
        query: &StationQuery,
        by: LatestBy,
    ) -> RepositoryResult<Vec<StationReading>>;
}
