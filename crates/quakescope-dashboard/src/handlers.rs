//! HTTP endpoint handlers for the dashboard server.
//!
//! Handlers are generic over the [`QuakeStore`] so tests can drive the
//! full router against [`MemoryStore`](quakescope_core::MemoryStore).
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Introduction page (HTML) |
//! | `GET` | `/about` | About page (HTML) |
//! | `GET` | `/api/pages` | Pages and the fetches each performs |
//! | `GET` | `/api/pages/{page}` | Run one page's fetch plan |
//! | `GET` | `/api/regions` | Region selector values |
//! | `GET` | `/api/visualization` | Filtered events plus derived views |
//! | `GET` | `/api/analysis` | Catalog entries |
//! | `GET` | `/api/analysis/{slug}` | Run one catalog entry |

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::Html;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;

use quakescope_core::{
    CatalogQuery, Fetch, PageState, QuakeStore, VisualizationOutcome, load_page, run_analysis,
    run_visualization,
};
use quakescope_types::{DateRange, FilterState, MagnitudeRange, Page, QuakeRecord, Summary};

use crate::error::DashboardError;
use crate::state::AppState;
use crate::templates::page_path;

/// Notice shown when no event matches the filters.
pub const NO_DATA_NOTICE: &str = "No earthquake data found for the selected filters.";

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters shared by the visualization and page endpoints.
#[derive(Debug, Default, serde::Deserialize)]
pub struct DashboardQuery {
    /// Region token; absent, empty, or `all` means every region.
    pub region: Option<String>,
    /// Inclusive lower magnitude bound.
    pub mag_min: Option<f64>,
    /// Inclusive upper magnitude bound.
    pub mag_max: Option<f64>,
    /// First day of the date range (`YYYY-MM-DD`).
    pub date_from: Option<NaiveDate>,
    /// Last day of the date range (`YYYY-MM-DD`).
    pub date_to: Option<NaiveDate>,
    /// Catalog slug or label for the analysis page.
    pub analysis: Option<String>,
}

impl DashboardQuery {
    /// Build the filter state, falling back to `defaults` for missing
    /// magnitude bounds.
    ///
    /// A date range applies only when both ends are given.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::InvalidQuery`] if `date_from` is after
    /// `date_to`.
    pub fn to_filter(&self, defaults: MagnitudeRange) -> Result<FilterState, DashboardError> {
        let magnitude = MagnitudeRange::new(
            self.mag_min.unwrap_or(defaults.min),
            self.mag_max.unwrap_or(defaults.max),
        );
        let filter = FilterState::new(self.region.clone().unwrap_or_default(), magnitude);

        match (self.date_from, self.date_to) {
            (Some(from), Some(to)) => DateRange::new(from, to)
                .map(|range| filter.with_date_range(range))
                .ok_or_else(|| {
                    DashboardError::InvalidQuery(format!(
                        "date_from {from} is after date_to {to}"
                    ))
                }),
            (None, None) => Ok(filter),
            _ => {
                tracing::debug!("Ignoring one-sided date range");
                Ok(filter)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// One row of the visualization table.
#[derive(Debug, Serialize)]
struct RecordView<'a> {
    time: DateTime<Utc>,
    magnitude: f64,
    depth_km: f64,
    place: &'a str,
}

impl<'a> From<&'a QuakeRecord> for RecordView<'a> {
    fn from(r: &'a QuakeRecord) -> Self {
        Self {
            time: r.time,
            magnitude: r.magnitude,
            depth_km: r.depth_km,
            place: &r.place,
        }
    }
}

/// Summary metrics as displayed, rounded to two decimals.
#[derive(Debug, Serialize)]
struct SummaryView {
    count: usize,
    max_magnitude: f64,
    mean_depth_km: f64,
}

impl From<Summary> for SummaryView {
    fn from(s: Summary) -> Self {
        Self {
            count: s.count,
            max_magnitude: round2(s.max_magnitude),
            mean_depth_km: round2(s.mean_depth_km),
        }
    }
}

/// Round to two decimal places for display.
#[allow(clippy::arithmetic_side_effects)]
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn visualization_body(filter: &FilterState, outcome: &VisualizationOutcome) -> Value {
    match outcome {
        VisualizationOutcome::NoData => serde_json::json!({
            "status": "no_data",
            "notice": NO_DATA_NOTICE,
            "filter": filter,
        }),
        VisualizationOutcome::Data { records, views } => {
            let rows: Vec<RecordView<'_>> = records.iter().map(RecordView::from).collect();
            serde_json::json!({
                "status": "ok",
                "filter": filter,
                "summary": SummaryView::from(views.summary),
                "records": rows,
                "trend": views.trend,
                "histogram": views.histogram,
                "map_points": views.map_points,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// GET / and GET /about -- static pages
// ---------------------------------------------------------------------------

/// Serve the Introduction page.
pub async fn index<S: QuakeStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Html<String>, DashboardError> {
    Ok(Html(state.pages.render(Page::Introduction)?))
}

/// Serve the About page.
pub async fn about<S: QuakeStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Html<String>, DashboardError> {
    Ok(Html(state.pages.render(Page::About)?))
}

// ---------------------------------------------------------------------------
// GET /api/pages -- page list and fetch plans
// ---------------------------------------------------------------------------

/// List the pages with the fetches each performs.
pub async fn list_pages() -> Json<Value> {
    let pages: Vec<Value> = Page::ALL
        .into_iter()
        .map(|page| {
            let mut state = PageState::default();
            state.navigate(page);
            let fetches: Vec<&str> = state.fetch_plan().iter().map(Fetch::kind).collect();
            serde_json::json!({
                "page": page,
                "title": page.title(),
                "path": page_path(page),
                "fetches": fetches,
            })
        })
        .collect();

    Json(serde_json::json!({ "pages": pages }))
}

/// Resolve a page from its URL segment.
fn parse_page(slug: &str) -> Result<Page, DashboardError> {
    Page::ALL
        .into_iter()
        .find(|page| page.slug() == slug)
        .ok_or_else(|| DashboardError::NotFound(format!("Page {slug} not found")))
}

/// Run one page's fetch plan with the filters and analysis in the query.
pub async fn get_page<S: QuakeStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(slug): Path<String>,
    params: Result<Query<DashboardQuery>, QueryRejection>,
) -> Result<Json<Value>, DashboardError> {
    let page = parse_page(&slug)?;
    let Query(params) = params?;
    let mut page_state = PageState::default();
    page_state.navigate(page);
    page_state.set_filter(params.to_filter(state.config.default_magnitude)?);
    if let Some(key) = params.analysis.as_deref() {
        page_state.select_analysis(CatalogQuery::from_key(key)?);
    }

    let data = load_page(&state.store, &page_state, state.config.histogram_bins).await?;

    Ok(Json(serde_json::json!({
        "page": page,
        "title": page.title(),
        "state": page_state,
        "data": data,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/regions
// ---------------------------------------------------------------------------

/// List region selector values.
pub async fn list_regions<S: QuakeStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Value>, DashboardError> {
    let regions = state.store.list_regions().await?;
    Ok(Json(serde_json::json!({
        "count": regions.len(),
        "regions": regions,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/visualization
// ---------------------------------------------------------------------------

/// Run the visualization pipeline for the filters in the query string.
///
/// An empty result is a `200` with `"status": "no_data"`, not an error.
pub async fn visualization<S: QuakeStore>(
    State(state): State<Arc<AppState<S>>>,
    params: Result<Query<DashboardQuery>, QueryRejection>,
) -> Result<Json<Value>, DashboardError> {
    let Query(params) = params?;
    let filter = params.to_filter(state.config.default_magnitude)?;
    let outcome = run_visualization(&state.store, &filter, state.config.histogram_bins).await?;

    tracing::info!(
        region = %filter.region,
        records = outcome.record_count(),
        "Served visualization"
    );

    Ok(Json(visualization_body(&filter, &outcome)))
}

// ---------------------------------------------------------------------------
// GET /api/analysis and GET /api/analysis/{slug}
// ---------------------------------------------------------------------------

/// List the catalog entries.
pub async fn list_analyses() -> Json<Value> {
    let entries: Vec<Value> = CatalogQuery::ALL
        .into_iter()
        .map(|q| {
            serde_json::json!({
                "slug": q.slug(),
                "label": q.label(),
                "shape": q.shape(),
            })
        })
        .collect();

    Json(serde_json::json!({
        "count": entries.len(),
        "queries": entries,
    }))
}

/// Run one catalog entry by slug or label.
pub async fn get_analysis<S: QuakeStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(key): Path<String>,
) -> Result<Json<Value>, DashboardError> {
    let query = CatalogQuery::from_key(&key)?;
    let result = run_analysis(&state.store, query).await?;

    tracing::info!(query = query.slug(), rows = result.row_count(), "Served analysis");

    let status = if result.is_empty() { "no_data" } else { "ok" };
    Ok(Json(serde_json::json!({
        "status": status,
        "slug": query.slug(),
        "label": query.label(),
        "shape": query.shape(),
        "columns": result.columns,
        "rows": result.rows,
    })))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn missing_bounds_use_defaults() {
        let filter = DashboardQuery::default()
            .to_filter(MagnitudeRange::new(4.0, 7.5))
            .unwrap();
        assert_eq!(filter.region, "");
        assert_eq!(filter.magnitude, MagnitudeRange::new(4.0, 7.5));
        assert!(filter.date_range.is_none());
    }

    #[test]
    fn reversed_dates_rejected() {
        let params = DashboardQuery {
            date_from: NaiveDate::from_ymd_opt(2024, 2, 1),
            date_to: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..DashboardQuery::default()
        };
        assert!(matches!(
            params.to_filter(MagnitudeRange::default()),
            Err(DashboardError::InvalidQuery(_))
        ));
    }

    #[test]
    fn one_sided_date_is_ignored() {
        let params = DashboardQuery {
            date_from: NaiveDate::from_ymd_opt(2024, 2, 1),
            ..DashboardQuery::default()
        };
        let filter = params.to_filter(MagnitudeRange::default()).unwrap();
        assert!(filter.date_range.is_none());
    }

    #[test]
    fn page_segments_resolve() {
        assert_eq!(parse_page("analysis").unwrap(), Page::Analysis);
        assert!(matches!(
            parse_page("nonexistent"),
            Err(DashboardError::NotFound(_))
        ));
    }

    #[test]
    fn rounding_for_display() {
        assert_eq!(round2(4.567), 4.57);
        assert_eq!(round2(50.0), 50.0);
    }
}
