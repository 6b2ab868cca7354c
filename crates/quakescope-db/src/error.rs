//! Error types for the data layer.
//!
//! All errors are propagated via [`DbError`], which wraps the underlying
//! [`sqlx`] error. At the store seam every [`DbError`] becomes a
//! [`DataAccessError`] so callers never see driver types.

use quakescope_core::DataAccessError;

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A result column has a type the catalog decoder does not handle.
    #[error("unsupported column type {type_name} for column {column}")]
    UnsupportedColumn {
        /// Column name.
        column: String,
        /// `PostgreSQL` type name.
        type_name: String,
    },

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DbError {
    /// Whether the error means the database could not be reached at all.
    pub const fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Postgres(
                sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
                    | sqlx::Error::Io(_)
                    | sqlx::Error::Tls(_)
            ) | Self::Config(_)
        )
    }
}

impl From<DbError> for DataAccessError {
    fn from(err: DbError) -> Self {
        let message = err.to_string();
        if err.is_unavailable() {
            Self::Unavailable { message }
        } else {
            Self::Query { message }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeout_is_unavailable() {
        let err: DataAccessError = DbError::Postgres(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(err, DataAccessError::Unavailable { .. }));
    }

    #[test]
    fn missing_row_is_query_failure() {
        let err: DataAccessError = DbError::Postgres(sqlx::Error::RowNotFound).into();
        assert!(matches!(err, DataAccessError::Query { .. }));
    }

    #[test]
    fn unsupported_column_is_query_failure() {
        let err: DataAccessError = DbError::UnsupportedColumn {
            column: "geom".to_owned(),
            type_name: "GEOMETRY".to_owned(),
        }
        .into();
        assert!(matches!(err, DataAccessError::Query { message } if message.contains("geom")));
    }
}
