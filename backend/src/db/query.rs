//! Query construction for the measurement store.
//!
//! Optional request filters are expressed as a small set of named
//! [`Predicate`]s. A [`StatementBuilder`] turns them into SQL text with
//! positional placeholders (`$1`, `$2`, ...) plus an ordered list of
//! [`SqlParam`] values. Filter values never appear in the statement text.

use chrono::{DateTime, Utc};

pub const DEFAULT_LIMIT: u32 = 100;
pub const MAX_LIMIT: u32 = 500;
pub const DEFAULT_HOURS: u32 = 24;
pub const MAX_HOURS: u32 = 168;

// Numeric columns are cast to double precision; the external schema may
// declare them as `numeric` or `float8`.
const MEASUREMENT_SELECT: &str = "station_id, pollutant, value::double precision AS value, \
     unit, city, location_name, lat::double precision AS lat, lon::double precision AS lon, \
     country, ts, source";

const MEASUREMENT_COLUMNS: &str =
    "station_id, pollutant, value, unit, city, location_name, lat, lon, country, ts, source";

const TIMEPOINT_SELECT: &str = "station_id, pollutant, value::double precision AS value, \
     unit, country, city, location_name, ts, source";

/// A value bound to a statement placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    BigInt(i64),
    Timestamptz(DateTime<Utc>),
}

/// A named equality/range filter on a single column.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    StationId(String),
    Country(String),
    Pollutant(String),
    /// `ts >= since`
    Since(DateTime<Utc>),
}

impl Predicate {
    fn column(&self) -> &'static str {
        match self {
            Predicate::StationId(_) => "station_id",
            Predicate::Country(_) => "country",
            Predicate::Pollutant(_) => "pollutant",
            Predicate::Since(_) => "ts",
        }
    }

    fn operator(&self) -> &'static str {
        match self {
            Predicate::Since(_) => ">=",
            _ => "=",
        }
    }

    fn param(&self) -> SqlParam {
        match self {
            Predicate::StationId(v) | Predicate::Country(v) | Predicate::Pollutant(v) => {
                SqlParam::Text(v.clone())
            }
            Predicate::Since(ts) => SqlParam::Timestamptz(*ts),
        }
    }

    /// Whether a measurement satisfies this predicate. Used by the in-memory
    /// repository so both backends agree on filter semantics.
    pub fn matches_measurement(&self, m: &crate::models::Measurement) -> bool {
        match self {
            Predicate::StationId(v) => m.station_id == *v,
            Predicate::Country(v) => m.country.as_deref() == Some(v.as_str()),
            Predicate::Pollutant(v) => m.pollutant == *v,
            Predicate::Since(ts) => m.timestamp >= *ts,
        }
    }

    /// Whether station metadata satisfies this predicate. Predicates on
    /// measurement-only columns always pass.
    pub fn matches_station(&self, s: &crate::models::Station) -> bool {
        match self {
            Predicate::StationId(v) => s.station_id == *v,
            Predicate::Country(v) => s.country.as_deref() == Some(v.as_str()),
            Predicate::Pollutant(_) | Predicate::Since(_) => true,
        }
    }
}

/// Drop empty strings so that `?country=` behaves like an absent filter.
fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

/// Parameters for the measurement listing.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementQuery {
    pub limit: u32,
    pub offset: u32,
    pub station_id: Option<String>,
    pub country: Option<String>,
    pub pollutant: Option<String>,
    pub latest_per_station: bool,
}

impl Default for MeasurementQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            station_id: None,
            country: None,
            pollutant: None,
            latest_per_station: false,
        }
    }
}

impl MeasurementQuery {
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();
        if let Some(v) = non_empty(&self.station_id) {
            predicates.push(Predicate::StationId(v));
        }
        if let Some(v) = non_empty(&self.country) {
            predicates.push(Predicate::Country(v));
        }
        if let Some(v) = non_empty(&self.pollutant) {
            predicates.push(Predicate::Pollutant(v));
        }
        predicates
    }
}

/// Parameters for a single station/pollutant time series.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeseriesQuery {
    pub station_id: String,
    pub pollutant: String,
    pub since: DateTime<Utc>,
}

impl TimeseriesQuery {
    pub fn predicates(&self) -> Vec<Predicate> {
        vec![
            Predicate::StationId(self.station_id.clone()),
            Predicate::Pollutant(self.pollutant.clone()),
            Predicate::Since(self.since),
        ]
    }
}

/// Parameters shared by both station snapshot endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationQuery {
    pub country: Option<String>,
    pub pollutant: Option<String>,
}

impl StationQuery {
    /// Predicates applied to measurements before ranking.
    pub fn measurement_predicates(&self) -> Vec<Predicate> {
        non_empty(&self.pollutant)
            .map(Predicate::Pollutant)
            .into_iter()
            .collect()
    }

    /// Predicates applied to station metadata after the join.
    pub fn station_predicates(&self) -> Vec<Predicate> {
        non_empty(&self.country)
            .map(Predicate::Country)
            .into_iter()
            .collect()
    }
}

/// Which rows survive the "latest per key" selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatestBy {
    /// One row per station: whichever pollutant was reported most recently.
    Station,
    /// One row per (station, pollutant).
    StationPollutant,
}

/// SQL text plus the values for its placeholders, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlStatement {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

#[derive(Debug, Default)]
pub struct StatementBuilder {
    sql: String,
    params: Vec<SqlParam>,
}

impl StatementBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: &str) -> &mut Self {
        self.sql.push_str(fragment);
        self
    }

    /// Register a parameter and return its placeholder.
    pub fn bind(&mut self, param: SqlParam) -> String {
        self.params.push(param);
        format!("${}", self.params.len())
    }

    /// Append a `WHERE` clause AND-ing the fixed conditions and predicates.
    /// Emits nothing when both are empty.
    pub fn push_where(
        &mut self,
        qualifier: Option<&str>,
        fixed: &[&str],
        predicates: &[Predicate],
    ) -> &mut Self {
        let mut conditions: Vec<String> = fixed.iter().map(|c| c.to_string()).collect();
        for predicate in predicates {
            let placeholder = self.bind(predicate.param());
            let column = match qualifier {
                Some(q) => format!("{}.{}", q, predicate.column()),
                None => predicate.column().to_string(),
            };
            conditions.push(format!("{} {} {}", column, predicate.operator(), placeholder));
        }
        if !conditions.is_empty() {
            self.sql.push_str(" WHERE ");
            self.sql.push_str(&conditions.join(" AND "));
        }
        self
    }

    pub fn push_pagination(&mut self, limit: u32, offset: u32) -> &mut Self {
        let limit = self.bind(SqlParam::BigInt(i64::from(limit)));
        let offset = self.bind(SqlParam::BigInt(i64::from(offset)));
        self.sql.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset));
        self
    }

    pub fn build(self) -> SqlStatement {
        SqlStatement {
            sql: self.sql,
            params: self.params,
        }
    }
}

/// Measurements ordered newest first, optionally reduced to the latest row
/// per (station, pollutant) before pagination.
pub fn list_measurements_sql(query: &MeasurementQuery) -> SqlStatement {
    let predicates = query.predicates();
    let mut b = StatementBuilder::new();

    if query.latest_per_station {
        b.push(&format!(
            "WITH filtered AS (SELECT {} FROM measurements",
            MEASUREMENT_SELECT
        ))
        .push_where(None, &[], &predicates)
        .push(&format!(
            "), latest AS (SELECT DISTINCT ON (station_id, pollutant) {} FROM filtered \
             ORDER BY station_id, pollutant, ts DESC) SELECT {} FROM latest",
            MEASUREMENT_COLUMNS, MEASUREMENT_COLUMNS
        ));
    } else {
        b.push(&format!("SELECT {} FROM measurements", MEASUREMENT_SELECT))
            .push_where(None, &[], &predicates);
    }

    b.push(" ORDER BY ts DESC, station_id, pollutant")
        .push_pagination(query.limit, query.offset);
    b.build()
}

/// All rows for one station/pollutant since a cutoff, oldest first.
pub fn timeseries_sql(query: &TimeseriesQuery) -> SqlStatement {
    let mut b = StatementBuilder::new();
    b.push(&format!("SELECT {} FROM measurements", TIMEPOINT_SELECT))
        .push_where(None, &[], &query.predicates())
        .push(" ORDER BY ts");
    b.build()
}

/// Latest reading per key joined to station metadata, skipping stations
/// without coordinates.
pub fn latest_station_readings_sql(query: &StationQuery, by: LatestBy) -> SqlStatement {
    let (distinct, ranking) = match by {
        LatestBy::Station => ("m.station_id", "m.station_id, m.ts DESC, m.pollutant"),
        LatestBy::StationPollutant => (
            "m.station_id, m.pollutant",
            "m.station_id, m.pollutant, m.ts DESC",
        ),
    };

    let mut b = StatementBuilder::new();
    b.push(&format!(
        "WITH latest_meas AS (SELECT DISTINCT ON ({}) \
         m.station_id, m.pollutant, m.value::double precision AS value, m.unit, m.ts \
         FROM measurements m",
        distinct
    ))
    .push_where(Some("m"), &[], &query.measurement_predicates())
    .push(&format!(" ORDER BY {})", ranking))
    .push(
        " SELECT s.station_id, s.source, s.country, s.city, s.location_name, \
         s.lat::double precision AS lat, s.lon::double precision AS lon, \
         lm.pollutant, lm.value, lm.unit, lm.ts \
         FROM stations s JOIN latest_meas lm ON lm.station_id = s.station_id",
    )
    .push_where(
        Some("s"),
        &["s.lat IS NOT NULL", "s.lon IS NOT NULL"],
        &query.station_predicates(),
    )
    .push(" ORDER BY s.station_id, lm.pollutant");
    b.build()
}
