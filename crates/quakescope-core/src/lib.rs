//! Query composition, catalog, and result projection for Quakescope.
//!
//! This crate holds everything between the dashboard and the event store
//! that does not depend on either: turning filter selections into a safe
//! parameterized query, the fixed analysis catalog, in-memory date
//! filtering, and the derived views shown on the visualization page.
//!
//! # Modules
//!
//! - [`catalog`] -- The closed set of analytical queries and key lookup.
//! - [`compose`] -- Parameterized visualization query composition.
//! - [`config`] -- Configuration loading from `quakescope-config.yaml` into
//!   strongly-typed structs.
//! - [`date_filter`] -- Inclusive date-range filtering after fetch.
//! - [`page`] -- Page state and per-page fetch plans.
//! - [`pipeline`] -- Visualization and analysis pipelines.
//! - [`projector`] -- Summary, trend, histogram, and map projections.
//! - [`region`] -- Region derivation from place descriptions.
//! - [`store`] -- [`QuakeStore`] trait and [`MemoryStore`].
//!
//! [`QuakeStore`]: store::QuakeStore
//! [`MemoryStore`]: store::MemoryStore

pub mod catalog;
pub mod compose;
pub mod config;
pub mod date_filter;
pub mod page;
pub mod pipeline;
pub mod projector;
pub mod region;
pub mod store;

pub use catalog::{CatalogError, CatalogQuery, lookup_catalog_query};
pub use compose::{
    ALL_REGIONS, FilterCriteria, FilteredQuery, QueryError, SqlParam, compose_filtered_query,
    compose_for, region_list_query,
};
pub use date_filter::apply_date_filter;
pub use page::{Fetch, PageState};
pub use pipeline::{
    PageData, PipelineError, VisualizationOutcome, load_page, run_analysis, run_visualization,
};
pub use projector::{DEFAULT_HISTOGRAM_BINS, ProjectionError, derive_views};
pub use store::{DataAccessError, MemoryStore, QuakeStore};
