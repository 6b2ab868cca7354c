//! Dashboard API server for Quakescope.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **HTML pages** for the static Introduction (`GET /`) and About
//!   (`GET /about`) pages, rendered with `minijinja`
//! - **REST endpoints** for the data-backed pages: region list, filtered
//!   visualization, and the analysis catalog
//!
//! # Architecture
//!
//! Every request runs one fetch-then-project cycle against the injected
//! [`QuakeStore`](quakescope_core::QuakeStore). The server keeps no
//! per-session state; the filters and catalog selection travel in the
//! request.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;
pub mod templates;

// Re-export primary types for convenience.
pub use error::DashboardError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
pub use templates::PageRenderer;
