//! Error types for the dashboard API server.
//!
//! [`DashboardError`] unifies all failure modes into a single enum that
//! can be converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use quakescope_core::{CatalogError, DataAccessError, PipelineError};

/// Body text of a `502`. Store details stay in the logs.
pub const UNAVAILABLE_MESSAGE: &str = "Earthquake data is currently unavailable.";

/// Errors that can occur in the dashboard API layer.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// An invalid query parameter was provided.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The event store failed.
    #[error(transparent)]
    DataAccess(#[from] DataAccessError),

    /// A page template failed to load or render.
    #[error("template error: {0}")]
    Template(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CatalogError> for DashboardError {
    fn from(err: CatalogError) -> Self {
        Self::NotFound(err.to_string())
    }
}

impl From<PipelineError> for DashboardError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Query(e) => Self::InvalidQuery(e.to_string()),
            PipelineError::DataAccess(e) => Self::DataAccess(e),
            PipelineError::Projection(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<QueryRejection> for DashboardError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidQuery(rejection.body_text())
    }
}

impl From<minijinja::Error> for DashboardError {
    fn from(err: minijinja::Error) -> Self {
        Self::Template(err.to_string())
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::InvalidQuery(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::DataAccess(e) => {
                tracing::warn!(error = %e, "Event store request failed");
                (StatusCode::BAD_GATEWAY, UNAVAILABLE_MESSAGE.to_owned())
            }
            Self::Template(msg) | Self::Internal(msg) => {
                tracing::error!(error = %msg, "Dashboard internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
