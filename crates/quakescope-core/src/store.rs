//! The event store seam.
//!
//! The core never talks to a database directly. It asks a [`QuakeStore`]
//! for three things: the region list, the rows matching a composed
//! [`FilteredQuery`], and the result of a catalog entry. The `PostgreSQL`
//! implementation lives in `quakescope-db`; [`MemoryStore`] serves tests
//! and local demos.

use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;

use quakescope_types::{QuakeEvent, QuakeRecord, QueryResult};

use crate::catalog::CatalogQuery;
use crate::compose::FilteredQuery;
use crate::region::region_of;

/// Errors reported by an event store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataAccessError {
    /// The store could not be reached (connection refused, pool exhausted,
    /// timeout).
    #[error("event store unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
    },

    /// The store was reached but rejected or failed the query.
    #[error("event store query failed: {message}")]
    Query {
        /// Description of the failure.
        message: String,
    },
}

/// Read access to stored earthquake events.
///
/// Implementations must be shareable across request handlers.
pub trait QuakeStore: Send + Sync {
    /// Distinct region tokens, sorted ascending.
    ///
    /// # Errors
    ///
    /// Returns [`DataAccessError`] if the store fails.
    fn list_regions(&self) -> impl Future<Output = Result<Vec<String>, DataAccessError>> + Send;

    /// Rows matching a composed query, ordered by time ascending.
    ///
    /// # Errors
    ///
    /// Returns [`DataAccessError`] if the store fails.
    fn fetch_events(
        &self,
        query: &FilteredQuery,
    ) -> impl Future<Output = Result<Vec<QuakeRecord>, DataAccessError>> + Send;

    /// Execute a catalog entry.
    ///
    /// # Errors
    ///
    /// Returns [`DataAccessError`] if the store fails.
    fn run_catalog(
        &self,
        query: CatalogQuery,
    ) -> impl Future<Output = Result<QueryResult, DataAccessError>> + Send;
}

/// An in-memory event store.
///
/// Filtered queries are answered by evaluating the query's structured
/// criteria. Catalog queries are not interpreted; their results are
/// registered up front with [`MemoryStore::with_catalog_result`], and
/// unregistered entries return an empty table.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    events: Vec<QuakeEvent>,
    catalog: BTreeMap<CatalogQuery, QueryResult>,
    failure: Option<String>,
}

impl MemoryStore {
    /// Create a store holding the given events.
    pub fn new(events: Vec<QuakeEvent>) -> Self {
        Self {
            events,
            ..Self::default()
        }
    }

    /// Register the result returned for a catalog entry.
    #[must_use]
    pub fn with_catalog_result(mut self, query: CatalogQuery, result: QueryResult) -> Self {
        self.catalog.insert(query, result);
        self
    }

    /// Make every call fail with [`DataAccessError::Unavailable`].
    #[must_use]
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    fn check_available(&self) -> Result<(), DataAccessError> {
        self.failure.as_ref().map_or(Ok(()), |message| {
            Err(DataAccessError::Unavailable {
                message: message.clone(),
            })
        })
    }
}

impl QuakeStore for MemoryStore {
    async fn list_regions(&self) -> Result<Vec<String>, DataAccessError> {
        self.check_available()?;
        let regions: BTreeSet<&str> = self
            .events
            .iter()
            .filter_map(|e| e.place.as_deref())
            .map(region_of)
            .collect();
        Ok(regions.into_iter().map(str::to_owned).collect())
    }

    async fn fetch_events(&self, query: &FilteredQuery) -> Result<Vec<QuakeRecord>, DataAccessError> {
        self.check_available()?;
        let criteria = query.criteria();
        let mut rows: Vec<QuakeRecord> = self
            .events
            .iter()
            .map(QuakeEvent::to_record)
            .filter(|r| criteria.matches(r))
            .collect();
        rows.sort_by_key(|r| r.time);
        Ok(rows)
    }

    async fn run_catalog(&self, query: CatalogQuery) -> Result<QueryResult, DataAccessError> {
        self.check_available()?;
        Ok(self.catalog.get(&query).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use quakescope_types::{CellValue, MagnitudeRange};

    use super::*;
    use crate::compose::compose_filtered_query;

    fn event(id: &str, day: u32, magnitude: f64, place: Option<&str>) -> QuakeEvent {
        QuakeEvent {
            id: id.to_owned(),
            time: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            magnitude,
            mag_type: None,
            depth_km: 10.0,
            place: place.map(str::to_owned),
            latitude: None,
            longitude: None,
            net: None,
            sig: None,
            status: None,
            event_type: None,
            types: None,
            rms: None,
            nst: None,
            gap: None,
            tsunami: false,
        }
    }

    fn store() -> MemoryStore {
        MemoryStore::new(vec![
            event("c", 3, 5.2, Some("Lima, Peru")),
            event("a", 1, 7.9, Some("120 km SE of Tokyo, Japan")),
            event("b", 2, 4.5, Some("Osaka, Japan")),
            event("d", 4, 6.0, None),
        ])
    }

    #[tokio::test]
    async fn regions_are_distinct_and_sorted() {
        let regions = store().list_regions().await.unwrap();
        assert_eq!(regions, vec!["Japan".to_owned(), "Peru".to_owned()]);
    }

    #[tokio::test]
    async fn fetch_filters_and_orders_by_time() {
        let query = compose_filtered_query("Japan", MagnitudeRange::new(4.0, 9.0)).unwrap();
        let rows = store().fetch_events(&query).await.unwrap();
        let places: Vec<&str> = rows.iter().map(|r| r.place.as_str()).collect();
        assert_eq!(places, vec!["120 km SE of Tokyo, Japan", "Osaka, Japan"]);
    }

    #[tokio::test]
    async fn unregistered_catalog_entry_is_empty() {
        let result = store().run_catalog(CatalogQuery::TopStrongest).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn registered_catalog_entry_is_returned() {
        let canned = QueryResult::new(
            vec!["total_tsunamis".to_owned()],
            vec![vec![CellValue::Int(4)]],
        );
        let store = store().with_catalog_result(CatalogQuery::TotalTsunamis, canned.clone());
        let result = store.run_catalog(CatalogQuery::TotalTsunamis).await.unwrap();
        assert_eq!(result, canned);
    }

    #[tokio::test]
    async fn failing_store_reports_unavailable() {
        let store = store().failing("connection refused");
        let err = store.list_regions().await.unwrap_err();
        assert!(matches!(err, DataAccessError::Unavailable { .. }));
    }
}
