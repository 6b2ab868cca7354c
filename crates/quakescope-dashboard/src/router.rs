//! Axum router construction for the dashboard API.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled for cross-origin front-end access.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use quakescope_core::QuakeStore;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the dashboard server.
///
/// The router includes:
/// - `GET /` -- Introduction page
/// - `GET /about` -- About page
/// - `GET /api/pages` -- page list and fetch plans
/// - `GET /api/pages/{page}` -- one page's data
/// - `GET /api/regions` -- region selector values
/// - `GET /api/visualization` -- filtered events and derived views
/// - `GET /api/analysis` -- catalog entries
/// - `GET /api/analysis/{slug}` -- one catalog result
///
/// The API is read-only, so CORS allows any origin.
pub fn build_router<S: QuakeStore + 'static>(state: Arc<AppState<S>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Static pages
        .route("/", get(handlers::index::<S>))
        .route("/about", get(handlers::about::<S>))
        // Page plans
        .route("/api/pages", get(handlers::list_pages))
        .route("/api/pages/{page}", get(handlers::get_page::<S>))
        // Visualization
        .route("/api/regions", get(handlers::list_regions::<S>))
        .route("/api/visualization", get(handlers::visualization::<S>))
        // Analysis
        .route("/api/analysis", get(handlers::list_analyses))
        .route("/api/analysis/{slug}", get(handlers::get_analysis::<S>))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
