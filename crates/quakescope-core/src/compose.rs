//! Query composition for the visualization page.
//!
//! Turns the user's region and magnitude selections into one parameterized
//! `SELECT` against the `earthquakes` table. User input only ever travels
//! as a bound parameter; the query text is assembled from constant
//! fragments and `$n` placeholders.
//!
//! # Query shape
//!
//! ```text
//! SELECT time::TIMESTAMPTZ AS time, mag AS magnitude, depth_km, place, latitude, longitude
//! FROM earthquakes
//! WHERE strpos(lower(place), lower($1)) > 0     -- omitted for "all"
//!   AND mag BETWEEN $2 AND $3
//! ORDER BY time
//! ```
//!
//! Region matching uses `strpos` rather than `LIKE`, so `%` and `_` typed
//! by the user are matched literally. `time` is cast to `TIMESTAMPTZ` so a
//! `timestamp without time zone` column decodes too; sessions run in UTC,
//! so the cast reads naive values as UTC.

use serde::Serialize;

use quakescope_types::{FilterState, MagnitudeRange, QuakeRecord};

use crate::region::REGION_SQL;

/// Select list and source shared by every filtered query.
const SELECT_EVENTS: &str = "SELECT time::TIMESTAMPTZ AS time, mag AS magnitude, depth_km, COALESCE(place, '') AS place, latitude, longitude\nFROM earthquakes";

/// Region selector value meaning "no region restriction".
pub const ALL_REGIONS: &str = "all";

/// Errors raised while composing a filtered query.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
    /// A magnitude bound is NaN or infinite.
    #[error("magnitude bounds must be finite (got {min}..{max})")]
    NonFiniteMagnitude {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },

    /// The lower magnitude bound exceeds the upper bound.
    #[error("magnitude minimum {min} exceeds maximum {max}")]
    InvertedMagnitude {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },
}

/// A value bound to a `$n` placeholder, in placeholder order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlParam {
    /// Bound as `TEXT`.
    Text(String),
    /// Bound as `DOUBLE PRECISION`.
    Float(f64),
}

/// The structured predicate a [`FilteredQuery`] encodes.
///
/// Stores that do not speak SQL evaluate this instead of the query text.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    region: Option<String>,
    magnitude: MagnitudeRange,
}

impl FilterCriteria {
    /// The region substring, or `None` when every region matches.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// The inclusive magnitude range.
    pub const fn magnitude(&self) -> MagnitudeRange {
        self.magnitude
    }

    /// Whether a record satisfies the predicate.
    ///
    /// Region matching is a case-insensitive, unanchored substring test on
    /// `place`, the same as the SQL predicate.
    pub fn matches(&self, record: &QuakeRecord) -> bool {
        let region_ok = self.region.as_deref().is_none_or(|term| {
            record
                .place
                .to_lowercase()
                .contains(&term.to_lowercase())
        });
        region_ok && self.magnitude.contains(record.magnitude)
    }
}

/// A composed visualization query: text, bound parameters, and the
/// predicate they encode.
///
/// Only constructible through [`compose_filtered_query`].
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredQuery {
    sql: String,
    params: Vec<SqlParam>,
    criteria: FilterCriteria,
}

impl FilteredQuery {
    /// The query text with `$n` placeholders.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Parameters in placeholder order.
    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }

    /// The structured predicate.
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }
}

/// Normalize a region selection into the substring to match.
///
/// Blank input and `"all"` (any case) mean no restriction.
pub fn region_term(region: &str) -> Option<&str> {
    let trimmed = region.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_REGIONS) {
        None
    } else {
        Some(trimmed)
    }
}

/// Compose the visualization query for a region and magnitude range.
///
/// The region predicate is omitted entirely when [`region_term`] yields
/// `None`. Rows come back ordered by time ascending.
///
/// # Errors
///
/// Returns [`QueryError::NonFiniteMagnitude`] for NaN or infinite bounds and
/// [`QueryError::InvertedMagnitude`] when `min > max`.
pub fn compose_filtered_query(
    region: &str,
    magnitude: MagnitudeRange,
) -> Result<FilteredQuery, QueryError> {
    let MagnitudeRange { min, max } = magnitude;
    if !(min.is_finite() && max.is_finite()) {
        return Err(QueryError::NonFiniteMagnitude { min, max });
    }
    if min > max {
        return Err(QueryError::InvertedMagnitude { min, max });
    }

    let term = region_term(region);
    let mut params = Vec::with_capacity(3);
    let mut predicates = Vec::with_capacity(2);

    if let Some(term) = term {
        params.push(SqlParam::Text(term.to_owned()));
        predicates.push(format!(
            "strpos(lower(place), lower(${})) > 0",
            params.len()
        ));
    }

    params.push(SqlParam::Float(min));
    let lower = params.len();
    params.push(SqlParam::Float(max));
    let upper = params.len();
    predicates.push(format!("mag BETWEEN ${lower} AND ${upper}"));

    let sql = format!(
        "{SELECT_EVENTS}\nWHERE {}\nORDER BY time",
        predicates.join("\n  AND ")
    );

    tracing::debug!(
        region_filtered = term.is_some(),
        param_count = params.len(),
        "Composed filtered query"
    );

    Ok(FilteredQuery {
        sql,
        params,
        criteria: FilterCriteria {
            region: term.map(str::to_owned),
            magnitude,
        },
    })
}

/// Compose the visualization query for a full [`FilterState`].
///
/// The date range is not part of the query; it is applied after fetch by
/// [`apply_date_filter`](crate::date_filter::apply_date_filter).
///
/// # Errors
///
/// Same as [`compose_filtered_query`].
pub fn compose_for(filter: &FilterState) -> Result<FilteredQuery, QueryError> {
    compose_filtered_query(&filter.region, filter.magnitude)
}

/// Query listing the distinct region tokens, for the region selector.
pub fn region_list_query() -> String {
    format!(
        "SELECT DISTINCT {REGION_SQL} AS region\nFROM earthquakes\nWHERE place IS NOT NULL\nORDER BY region"
    )
}
