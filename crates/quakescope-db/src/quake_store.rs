//! Read operations on the `earthquakes` table.
//!
//! Filtered queries arrive fully composed; this module only binds their
//! parameters in placeholder order and maps rows. Catalog results have
//! heterogeneous columns, so they are decoded cell by cell from the
//! column's `PostgreSQL` type.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sqlx::postgres::{PgColumn, PgRow};
use sqlx::{Column, Executor, PgPool, Row, Statement, TypeInfo};

use quakescope_core::{
    CatalogQuery, DataAccessError, FilteredQuery, QuakeStore, SqlParam, region_list_query,
};
use quakescope_types::{CellValue, QuakeRecord, QueryResult};

use crate::error::DbError;
use crate::postgres::PostgresPool;

/// A row of the filtered visualization query.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecordRow {
    /// Origin time.
    pub time: DateTime<Utc>,
    /// Magnitude.
    pub magnitude: f64,
    /// Depth in kilometres.
    pub depth_km: f64,
    /// Place description, empty when unset.
    pub place: String,
    /// Latitude.
    pub latitude: Option<f64>,
    /// Longitude.
    pub longitude: Option<f64>,
}

impl From<RecordRow> for QuakeRecord {
    fn from(row: RecordRow) -> Self {
        Self {
            time: row.time,
            magnitude: row.magnitude,
            depth_km: row.depth_km,
            place: row.place,
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}

/// [`QuakeStore`] backed by a `PostgreSQL` pool.
///
/// Owns a clone of the pool handle, so it can live in shared server state.
#[derive(Debug, Clone)]
pub struct PgQuakeStore {
    pool: PgPool,
}

impl PgQuakeStore {
    /// Create a store over an existing pool.
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a store sharing a [`PostgresPool`]'s connections.
    pub fn from_pool(pool: &PostgresPool) -> Self {
        Self::new(pool.pool().clone())
    }

    async fn regions(&self) -> Result<Vec<String>, DbError> {
        let sql = region_list_query();
        let rows: Vec<(Option<String>,)> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        let regions: Vec<String> = rows.into_iter().filter_map(|(r,)| r).collect();
        tracing::debug!(count = regions.len(), "Loaded region list");
        Ok(regions)
    }

    async fn events(&self, query: &FilteredQuery) -> Result<Vec<QuakeRecord>, DbError> {
        let mut statement = sqlx::query_as::<_, RecordRow>(query.sql());
        for param in query.params() {
            statement = match param {
                SqlParam::Text(text) => statement.bind(text.as_str()),
                SqlParam::Float(value) => statement.bind(*value),
            };
        }

        let rows = statement.fetch_all(&self.pool).await?;
        tracing::debug!(
            rows = rows.len(),
            region = query.criteria().region().unwrap_or("all"),
            "Fetched filtered events"
        );
        Ok(rows.into_iter().map(QuakeRecord::from).collect())
    }

    async fn catalog(&self, query: CatalogQuery) -> Result<QueryResult, DbError> {
        let rows = sqlx::query(query.sql()).fetch_all(&self.pool).await?;

        // An empty result still carries its headers; take them from the
        // prepared statement.
        let columns = match rows.first() {
            Some(row) => column_names(row.columns()),
            None => column_names(self.pool.prepare(query.sql()).await?.columns()),
        };

        let decoded = rows
            .iter()
            .map(decode_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(query = query.slug(), rows = decoded.len(), "Ran catalog query");
        Ok(QueryResult::new(columns, decoded))
    }
}

impl QuakeStore for PgQuakeStore {
    async fn list_regions(&self) -> Result<Vec<String>, DataAccessError> {
        Ok(self.regions().await?)
    }

    async fn fetch_events(&self, query: &FilteredQuery) -> Result<Vec<QuakeRecord>, DataAccessError> {
        Ok(self.events(query).await?)
    }

    async fn run_catalog(&self, query: CatalogQuery) -> Result<QueryResult, DataAccessError> {
        Ok(self.catalog(query).await?)
    }
}

// ---------------------------------------------------------------------------
// Dynamic cell decoding
// ---------------------------------------------------------------------------

fn column_names(columns: &[PgColumn]) -> Vec<String> {
    columns.iter().map(|c| c.name().to_owned()).collect()
}

fn decode_row(row: &PgRow) -> Result<Vec<CellValue>, DbError> {
    row.columns()
        .iter()
        .map(|column| decode_cell(row, column.ordinal(), column.name(), column.type_info().name()))
        .collect()
}

fn decode_cell(
    row: &PgRow,
    index: usize,
    column: &str,
    type_name: &str,
) -> Result<CellValue, DbError> {
    let cell = match type_name {
        "INT2" => row.try_get::<Option<i16>, _>(index)?.map(|v| CellValue::Int(i64::from(v))),
        "INT4" => row.try_get::<Option<i32>, _>(index)?.map(|v| CellValue::Int(i64::from(v))),
        "INT8" => row.try_get::<Option<i64>, _>(index)?.map(CellValue::Int),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(index)?
            .map(|v| CellValue::Float(f64::from(v))),
        "FLOAT8" => row.try_get::<Option<f64>, _>(index)?.map(CellValue::Float),
        "NUMERIC" => row
            .try_get::<Option<Decimal>, _>(index)?
            .map(|v| v.to_f64().map_or(CellValue::Null, CellValue::Float)),
        "BOOL" => row.try_get::<Option<bool>, _>(index)?.map(CellValue::Bool),
        "TIMESTAMPTZ" => row
            .try_get::<Option<DateTime<Utc>>, _>(index)?
            .map(CellValue::Timestamp),
        "TIMESTAMP" => row
            .try_get::<Option<NaiveDateTime>, _>(index)?
            .map(|v| CellValue::Timestamp(v.and_utc())),
        "DATE" => row.try_get::<Option<NaiveDate>, _>(index)?.map(CellValue::Date),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => {
            row.try_get::<Option<String>, _>(index)?.map(CellValue::Text)
        }
        other => {
            return Err(DbError::UnsupportedColumn {
                column: column.to_owned(),
                type_name: other.to_owned(),
            });
        }
    };
    Ok(cell.unwrap_or(CellValue::Null))
}
