//! Shared type definitions for the Quakescope earthquake explorer.
//!
//! This crate is the single source of truth for all types that cross crate
//! boundaries in the workspace. Types defined here flow downstream to
//! `TypeScript` via `ts-rs` for dashboard consumers.
//!
//! # Modules
//!
//! - [`enums`] -- Pages, catalog result shapes, dynamically typed cells
//! - [`structs`] -- Events, filter state, query results, derived views

pub mod enums;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{CellValue, Page, ResultShape};
pub use structs::{
    DateRange, DerivedViews, FilterState, Histogram, HistogramBin, MAGNITUDE_SLIDER_MAX,
    MAGNITUDE_SLIDER_MIN, MagnitudeRange, MapPoint, QuakeEvent, QuakeRecord, QueryResult, Summary,
    TrendPoint,
};
