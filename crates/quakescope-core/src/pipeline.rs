//! Page data pipelines.
//!
//! The visualization pipeline runs compose, fetch, date filter, then
//! derive, and reports an empty record set as [`VisualizationOutcome::NoData`]
//! rather than an error. The analysis pipeline runs one catalog entry.

use serde::Serialize;

use quakescope_types::{DerivedViews, FilterState, QuakeRecord, QueryResult};

use crate::catalog::CatalogQuery;
use crate::compose::{QueryError, compose_for};
use crate::date_filter::apply_date_filter;
use crate::page::{Fetch, PageState};
use crate::projector::{ProjectionError, derive_views};
use crate::store::{DataAccessError, QuakeStore};

/// Errors raised by a page pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    /// The filter selections could not be composed into a query.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The event store failed.
    #[error(transparent)]
    DataAccess(#[from] DataAccessError),

    /// Views could not be derived from the fetched rows.
    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

/// Result of the visualization pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VisualizationOutcome {
    /// No event matched the filters.
    NoData,
    /// Matching events and the views derived from them.
    Data {
        /// Matching rows, ascending by time.
        records: Vec<QuakeRecord>,
        /// Summary, charts, and map points.
        views: DerivedViews,
    },
}

impl VisualizationOutcome {
    /// Number of matching records.
    pub fn record_count(&self) -> usize {
        match self {
            Self::NoData => 0,
            Self::Data { records, .. } => records.len(),
        }
    }
}

/// Run the visualization pipeline for one filter state.
///
/// # Errors
///
/// Returns [`PipelineError::Query`] for invalid magnitude bounds,
/// [`PipelineError::DataAccess`] if the store fails, and
/// [`PipelineError::Projection`] when `bins` is zero.
pub async fn run_visualization<S: QuakeStore>(
    store: &S,
    filter: &FilterState,
    bins: usize,
) -> Result<VisualizationOutcome, PipelineError> {
    let query = compose_for(filter)?;
    let fetched = store.fetch_events(&query).await?;
    let fetched_count = fetched.len();
    let records = apply_date_filter(fetched, filter.date_range);

    if records.is_empty() {
        tracing::info!(
            region = %filter.region,
            fetched = fetched_count,
            "No events match the current filters"
        );
        return Ok(VisualizationOutcome::NoData);
    }

    let views = derive_views(&records, bins)?;
    tracing::debug!(
        region = %filter.region,
        records = records.len(),
        max_magnitude = views.summary.max_magnitude,
        "Visualization pipeline complete"
    );
    Ok(VisualizationOutcome::Data { records, views })
}

/// Run one catalog entry.
///
/// A result whose dimensions do not fit the entry's declared shape is
/// still returned, with a warning logged.
///
/// # Errors
///
/// Returns [`PipelineError::DataAccess`] if the store fails.
pub async fn run_analysis<S: QuakeStore>(
    store: &S,
    query: CatalogQuery,
) -> Result<QueryResult, PipelineError> {
    let result = store.run_catalog(query).await?;
    if !query.shape().admits(result.columns.len(), result.row_count()) {
        tracing::warn!(
            query = query.slug(),
            columns = result.columns.len(),
            rows = result.row_count(),
            "Catalog result does not match its declared shape"
        );
    }
    Ok(result)
}

/// Everything a page needs, fetched according to its plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageData {
    /// Region selector options, when the page shows filters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<String>>,
    /// Visualization outcome, when the page shows charts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visualization: Option<VisualizationOutcome>,
    /// Catalog result, when the page shows an analysis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<QueryResult>,
}

/// Execute a page's fetch plan.
///
/// Static pages return an empty [`PageData`] without touching the store.
///
/// # Errors
///
/// Returns the first [`PipelineError`] raised by any fetch.
pub async fn load_page<S: QuakeStore>(
    store: &S,
    state: &PageState,
    bins: usize,
) -> Result<PageData, PipelineError> {
    let mut data = PageData::default();
    for fetch in state.fetch_plan() {
        match fetch {
            Fetch::Regions => data.regions = Some(store.list_regions().await?),
            Fetch::FilteredEvents(filter) => {
                data.visualization = Some(run_visualization(store, &filter, bins).await?);
            }
            Fetch::Catalog(query) => data.analysis = Some(run_analysis(store, query).await?),
        }
    }
    Ok(data)
}
