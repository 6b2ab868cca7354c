//! `PostgreSQL` event store for Quakescope.
//!
//! The `earthquakes` table is populated by an external ingestion job; this
//! crate only reads it. It provides the connection pool and the
//! [`PgQuakeStore`] implementation of
//! [`QuakeStore`](quakescope_core::QuakeStore).
//!
//! # Modules
//!
//! - [`postgres`] -- `PostgreSQL` connection pool and configuration
//! - [`quake_store`] -- Filtered event reads, region list, catalog execution
//! - [`error`] -- Shared error types

pub mod error;
pub mod postgres;
pub mod quake_store;

// Re-export primary types for convenience.
pub use error::DbError;
pub use postgres::{PostgresConfig, PostgresPool};
pub use quake_store::{PgQuakeStore, RecordRow};
