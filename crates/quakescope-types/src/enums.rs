//! Enumeration types shared across the Quakescope workspace.
//!
//! Covers dashboard pages, catalog result shapes, and the dynamically
//! typed cell values returned by catalog queries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// A page of the dashboard.
///
/// Navigation between pages is the only piece of session state the
/// presentation layer keeps. Each page maps to a fixed set of data
/// fetches (see `quakescope_core::page`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum Page {
    /// Project introduction. Static content, no data.
    #[default]
    Introduction,
    /// Filtered event table, summary, charts, and map.
    Visualization,
    /// Canned analytical SQL catalog.
    Analysis,
    /// Creator information. Static content, no data.
    About,
}

impl Page {
    /// All pages in navigation order.
    pub const ALL: [Self; 4] = [
        Self::Introduction,
        Self::Visualization,
        Self::Analysis,
        Self::About,
    ];

    /// URL segment, matching the serde name.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Introduction => "introduction",
            Self::Visualization => "visualization",
            Self::Analysis => "analysis",
            Self::About => "about",
        }
    }

    /// Human-readable navigation title.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Introduction => "Project Introduction",
            Self::Visualization => "Earthquake Visualization",
            Self::Analysis => "SQL Analysis",
            Self::About => "Creator Info",
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog result shapes
// ---------------------------------------------------------------------------

/// The expected shape of a catalog query's result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultShape {
    /// Exactly one row with exactly one column.
    Scalar,
    /// A table, optionally capped by a `LIMIT` clause.
    Table {
        /// Upper bound on the number of rows, if the query has a limit.
        max_rows: Option<u32>,
    },
}

impl ResultShape {
    /// Check whether a result with the given dimensions fits this shape.
    pub const fn admits(self, columns: usize, rows: usize) -> bool {
        match self {
            Self::Scalar => columns == 1 && rows == 1,
            Self::Table { max_rows: None } => true,
            Self::Table {
                max_rows: Some(max),
            } => rows <= max as usize,
        }
    }
}

// ---------------------------------------------------------------------------
// Cell values
// ---------------------------------------------------------------------------

/// One cell of a [`QueryResult`](crate::QueryResult).
///
/// Catalog queries return heterogeneous columns (counts, averages, text
/// labels, timestamps), so cells are dynamically typed. Serialized
/// untagged so JSON consumers see plain values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(untagged)]
pub enum CellValue {
    /// SQL `NULL`.
    Null,
    /// Boolean column.
    Bool(bool),
    /// Any integer column (widened to 64 bits).
    Int(i64),
    /// Any floating-point or numeric column.
    Float(f64),
    /// Timestamp column, normalized to UTC.
    Timestamp(DateTime<Utc>),
    /// Date column.
    Date(NaiveDate),
    /// Text column.
    Text(String),
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_shape_requires_one_by_one() {
        assert!(ResultShape::Scalar.admits(1, 1));
        assert!(!ResultShape::Scalar.admits(2, 1));
        assert!(!ResultShape::Scalar.admits(1, 0));
    }

    #[test]
    fn limited_table_shape_caps_rows() {
        let shape = ResultShape::Table { max_rows: Some(10) };
        assert!(shape.admits(3, 0));
        assert!(shape.admits(3, 10));
        assert!(!shape.admits(3, 11));
    }

    #[test]
    fn cell_values_serialize_untagged() {
        let cells = vec![
            CellValue::Null,
            CellValue::Int(42),
            CellValue::from("Japan"),
            CellValue::from(None::<i64>),
        ];
        let json = serde_json::to_value(&cells).unwrap_or_default();
        assert_eq!(json, serde_json::json!([null, 42, "Japan", null]));
    }

    #[test]
    fn page_serializes_snake_case() {
        let json = serde_json::to_value(Page::Visualization).unwrap_or_default();
        assert_eq!(json, serde_json::json!("visualization"));
    }

    #[test]
    fn page_slugs_match_serde_names() {
        for page in Page::ALL {
            let json = serde_json::to_value(page).unwrap_or_default();
            assert_eq!(json, serde_json::json!(page.slug()));
        }
    }
}
