//! Error types for the server binary.
//!
//! [`ServerError`] is the top-level error type that wraps all possible
//! failure modes during startup and serving.

/// Top-level error for the server binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: quakescope_core::config::ConfigError,
    },

    /// Connecting to `PostgreSQL` failed.
    #[error("database error: {source}")]
    Database {
        /// The underlying data layer error.
        #[from]
        source: quakescope_db::DbError,
    },

    /// The dashboard could not be initialized.
    #[error("dashboard error: {source}")]
    Dashboard {
        /// The underlying dashboard error.
        #[from]
        source: quakescope_dashboard::DashboardError,
    },

    /// The HTTP server failed to bind or serve.
    #[error("http error: {source}")]
    Http {
        /// The underlying server error.
        #[from]
        source: quakescope_dashboard::ServerError,
    },
}
