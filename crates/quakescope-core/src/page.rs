//! Dashboard page state and the data each page needs.
//!
//! The only session state is the current page, the visualization filters,
//! and the selected catalog entry. Each page maps to a fixed fetch plan;
//! the introduction and about pages fetch nothing.

use serde::Serialize;

use quakescope_types::{FilterState, Page};

use crate::catalog::CatalogQuery;

/// One data fetch a page performs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum Fetch {
    /// The distinct region list for the selector.
    Regions,
    /// The filtered event set for the current filters.
    FilteredEvents(FilterState),
    /// One catalog entry.
    Catalog(CatalogQuery),
}

impl Fetch {
    /// Short name of the fetch, for logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Regions => "regions",
            Self::FilteredEvents(_) => "filtered_events",
            Self::Catalog(_) => "catalog",
        }
    }
}

/// Per-session dashboard state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageState {
    /// The page being shown.
    pub page: Page,
    /// Visualization filters.
    pub filter: FilterState,
    /// Selected catalog entry.
    pub analysis: CatalogQuery,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page: Page::default(),
            filter: FilterState::default(),
            analysis: CatalogQuery::first(),
        }
    }
}

impl PageState {
    /// Switch pages. Filters and the analysis selection are kept.
    pub fn navigate(&mut self, page: Page) {
        if self.page != page {
            tracing::debug!(from = ?self.page, to = ?page, "Page navigation");
            self.page = page;
        }
    }

    /// Replace the visualization filters.
    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
    }

    /// Select a catalog entry.
    pub const fn select_analysis(&mut self, query: CatalogQuery) {
        self.analysis = query;
    }

    /// The fetches the current page performs, in order.
    pub fn fetch_plan(&self) -> Vec<Fetch> {
        match self.page {
            Page::Introduction | Page::About => Vec::new(),
            Page::Visualization => vec![Fetch::Regions, Fetch::FilteredEvents(self.filter.clone())],
            Page::Analysis => vec![Fetch::Catalog(self.analysis)],
        }
    }
}

#[cfg(test)]
mod tests {
    use quakescope_types::MagnitudeRange;

    use super::*;

    #[test]
    fn default_state_is_introduction_with_first_entry() {
        let state = PageState::default();
        assert_eq!(state.page, Page::Introduction);
        assert_eq!(state.analysis, CatalogQuery::TopStrongest);
        assert!(state.fetch_plan().is_empty());
    }

    #[test]
    fn static_pages_fetch_nothing() {
        let mut state = PageState::default();
        state.navigate(Page::About);
        assert!(state.fetch_plan().is_empty());
    }

    #[test]
    fn visualization_fetches_regions_then_events() {
        let mut state = PageState::default();
        let filter = FilterState::new("Japan", MagnitudeRange::new(5.0, 8.0));
        state.set_filter(filter.clone());
        state.navigate(Page::Visualization);
        assert_eq!(
            state.fetch_plan(),
            vec![Fetch::Regions, Fetch::FilteredEvents(filter)]
        );
    }

    #[test]
    fn analysis_fetches_selected_entry() {
        let mut state = PageState::default();
        state.navigate(Page::Analysis);
        state.select_analysis(CatalogQuery::TotalTsunamis);
        let plan = state.fetch_plan();
        assert_eq!(plan, vec![Fetch::Catalog(CatalogQuery::TotalTsunamis)]);
        assert_eq!(plan.first().map(Fetch::kind), Some("catalog"));
    }

    #[test]
    fn navigation_keeps_filters() {
        let mut state = PageState::default();
        let filter = FilterState::new("Peru", MagnitudeRange::new(4.0, 9.5));
        state.set_filter(filter.clone());
        state.navigate(Page::Analysis);
        state.navigate(Page::Visualization);
        assert_eq!(state.filter, filter);
    }
}
