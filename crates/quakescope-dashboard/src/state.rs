//! Shared application state for the dashboard API server.
//!
//! [`AppState`] holds the injected event store, the dashboard defaults,
//! and the page renderer. It is immutable after startup, so handlers
//! share it through an [`Arc`](std::sync::Arc) without locking.

use quakescope_core::QuakeStore;
use quakescope_core::config::DashboardConfig;

use crate::error::DashboardError;
use crate::templates::PageRenderer;

/// Shared state for all dashboard handlers.
pub struct AppState<S> {
    /// The event store every request reads from.
    pub store: S,
    /// Histogram size and default filters.
    pub config: DashboardConfig,
    /// Static page renderer.
    pub pages: PageRenderer,
}

impl<S: QuakeStore> AppState<S> {
    /// Create state over a store with the given dashboard defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Template`] if the page templates fail to
    /// load.
    pub fn new(store: S, config: DashboardConfig) -> Result<Self, DashboardError> {
        Ok(Self {
            store,
            config,
            pages: PageRenderer::new()?,
        })
    }
}
