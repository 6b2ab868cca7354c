//! Core entity structs for the Quakescope earthquake explorer.
//!
//! Covers the stored event record, the projected row the visualization
//! pipeline works on, the user's filter state, raw query results, and the
//! derived views handed to presentation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::CellValue;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// One earthquake as stored in the `earthquakes` table.
///
/// Events are owned by the store and never mutated by the core. The
/// auxiliary reporting fields are only read by catalog queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct QuakeEvent {
    /// Upstream event identifier (e.g. `us7000abcd`).
    pub id: String,
    /// Origin time.
    pub time: DateTime<Utc>,
    /// Magnitude.
    pub magnitude: f64,
    /// Magnitude scale (`mb`, `mww`, ...).
    pub mag_type: Option<String>,
    /// Hypocenter depth in kilometres.
    pub depth_km: f64,
    /// Free-text place description, e.g. `"120 km SE of Tokyo, Japan"`.
    pub place: Option<String>,
    /// Latitude in degrees.
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    pub longitude: Option<f64>,
    /// Reporting network.
    pub net: Option<String>,
    /// Significance score.
    pub sig: Option<i32>,
    /// Review status (`reviewed` / `automatic`).
    pub status: Option<String>,
    /// Event type (`earthquake`, `quarry blast`, ...).
    pub event_type: Option<String>,
    /// Comma-separated list of product types.
    pub types: Option<String>,
    /// Root-mean-square travel time residual.
    pub rms: Option<f64>,
    /// Number of reporting stations.
    pub nst: Option<i32>,
    /// Largest azimuthal gap between stations, in degrees.
    pub gap: Option<f64>,
    /// Whether a tsunami flag was raised.
    pub tsunami: bool,
}

impl QuakeEvent {
    /// Project this event onto the columns the visualization page reads.
    pub fn to_record(&self) -> QuakeRecord {
        QuakeRecord {
            time: self.time,
            magnitude: self.magnitude,
            depth_km: self.depth_km,
            place: self.place.clone().unwrap_or_default(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// One row of the filtered visualization query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct QuakeRecord {
    /// Origin time.
    pub time: DateTime<Utc>,
    /// Magnitude.
    pub magnitude: f64,
    /// Depth in kilometres.
    pub depth_km: f64,
    /// Place description (empty when the store has none).
    pub place: String,
    /// Latitude, if reported.
    pub latitude: Option<f64>,
    /// Longitude, if reported.
    pub longitude: Option<f64>,
}

impl QuakeRecord {
    /// The calendar date (UTC) of the origin time.
    pub fn date(&self) -> NaiveDate {
        self.time.date_naive()
    }
}

// ---------------------------------------------------------------------------
// Filter state
// ---------------------------------------------------------------------------

/// Lower bound of the magnitude slider.
pub const MAGNITUDE_SLIDER_MIN: f64 = 4.0;

/// Upper bound of the magnitude slider.
pub const MAGNITUDE_SLIDER_MAX: f64 = 9.5;

/// An inclusive magnitude interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MagnitudeRange {
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
}

impl MagnitudeRange {
    /// Create a range. Ordering is checked by the query composer.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `magnitude` lies within the inclusive range.
    pub const fn contains(&self, magnitude: f64) -> bool {
        self.min <= magnitude && magnitude <= self.max
    }
}

impl Default for MagnitudeRange {
    fn default() -> Self {
        Self::new(MAGNITUDE_SLIDER_MIN, 7.5)
    }
}

/// An inclusive calendar-date interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DateRange {
    /// First day included.
    pub start: NaiveDate,
    /// Last day included.
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, returning `None` if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Whether `date` lies within the inclusive range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The user's current filter selections on the visualization page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FilterState {
    /// Selected region token. Empty or `"all"` means no region restriction.
    pub region: String,
    /// Selected magnitude interval.
    pub magnitude: MagnitudeRange,
    /// Selected date interval; `None` means unbounded.
    pub date_range: Option<DateRange>,
}

impl FilterState {
    /// Create a filter state with no date restriction.
    pub fn new(region: impl Into<String>, magnitude: MagnitudeRange) -> Self {
        Self {
            region: region.into(),
            magnitude,
            date_range: None,
        }
    }

    /// Restrict the filter to a date range.
    #[must_use]
    pub const fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }
}

// ---------------------------------------------------------------------------
// Query results
// ---------------------------------------------------------------------------

/// A rectangular result set: column names plus ordered rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct QueryResult {
    /// Column names in select-list order.
    pub columns: Vec<String>,
    /// Rows; every row has one cell per column.
    pub rows: Vec<Vec<CellValue>>,
}

impl QueryResult {
    /// Create a result from column names and rows.
    pub const fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { columns, rows }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the result has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The single cell of a one-row, one-column result.
    pub fn scalar(&self) -> Option<&CellValue> {
        match (self.columns.as_slice(), self.rows.as_slice()) {
            ([_], [row]) => row.first(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// Summary metrics for a non-empty record set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Summary {
    /// Number of records.
    pub count: usize,
    /// Largest magnitude.
    pub max_magnitude: f64,
    /// Arithmetic mean depth in kilometres.
    pub mean_depth_km: f64,
}

/// One point of the magnitude trend chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TrendPoint {
    /// Origin time.
    pub time: DateTime<Utc>,
    /// Magnitude.
    pub magnitude: f64,
}

/// One equal-width depth bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HistogramBin {
    /// Inclusive lower edge.
    pub lower: f64,
    /// Upper edge (exclusive, except for the last bin).
    pub upper: f64,
    /// Number of records falling into this bin.
    pub count: usize,
}

/// Depth-frequency histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Histogram {
    /// Width shared by every bin.
    pub bin_width: f64,
    /// Bins in ascending depth order.
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Sum of all bin counts.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// One plottable map coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MapPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

/// Everything the visualization page renders besides the raw table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DerivedViews {
    /// Summary metrics.
    pub summary: Summary,
    /// Magnitude over time, ascending by time.
    pub trend: Vec<TrendPoint>,
    /// Depth distribution.
    pub histogram: Histogram,
    /// Coordinates for the map.
    pub map_points: Vec<MapPoint>,
}
