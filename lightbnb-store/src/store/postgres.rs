//! Postgres store backed by a sqlx connection pool

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Number, Value};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{Column, PgPool, Row as _, TypeInfo, ValueRef};

use super::{Row, Store, StoreConfig, StoreError};
use crate::query::{BuiltQuery, SqlValue};

/// Postgres implementation of [`Store`].
///
/// Cloning is cheap and shares the pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Open a pool for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid or the first connection
    /// fails.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(config.connect_options()?)
            .await?;
        tracing::debug!(max_connections = config.max_connections, "store connected");
        Ok(Self { pool })
    }

    /// Build the pool without connecting; the first statement opens a
    /// connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connect options are invalid.
    pub fn connect_lazy(config: &StoreConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_lazy_with(config.connect_options()?);
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close every connection; later calls fail.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("store closed");
    }
}

#[async_trait]
impl Store for PgStore {
    async fn execute(&self, query: &BuiltQuery) -> Result<Vec<Row>, StoreError> {
        let mut statement = sqlx::query(query.text());
        for param in query.params() {
            statement = match param {
                SqlValue::Text(s) => statement.bind(s.as_str()),
                SqlValue::Int(n) => statement.bind(*n),
                SqlValue::Float(f) => statement.bind(*f),
                SqlValue::Null => statement.bind(None::<String>),
            };
        }

        tracing::trace!(sql = query.text(), "executing");
        let rows = statement.fetch_all(&self.pool).await?;
        tracing::debug!(
            params = query.params().len(),
            rows = rows.len(),
            "statement executed"
        );

        rows.iter().map(decode_row).collect()
    }
}

/// Decode every column by its Postgres type name.
fn decode_row(row: &PgRow) -> Result<Row, StoreError> {
    let mut out = Row::new();
    for column in row.columns() {
        let idx = column.ordinal();
        let type_name = column.type_info().name();

        let value = if row.try_get_raw(idx)?.is_null() {
            Value::Null
        } else {
            match type_name {
                "INT2" => Value::from(row.try_get::<i16, _>(idx)?),
                "INT4" => Value::from(row.try_get::<i32, _>(idx)?),
                "INT8" => Value::from(row.try_get::<i64, _>(idx)?),
                "FLOAT4" => float(f64::from(row.try_get::<f32, _>(idx)?)),
                "FLOAT8" => float(row.try_get::<f64, _>(idx)?),
                "BOOL" => Value::Bool(row.try_get::<bool, _>(idx)?),
                "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => {
                    Value::String(row.try_get::<String, _>(idx)?)
                }
                "DATE" => Value::String(row.try_get::<NaiveDate, _>(idx)?.to_string()),
                "TIMESTAMP" => Value::String(
                    row.try_get::<NaiveDateTime, _>(idx)?
                        .format("%Y-%m-%dT%H:%M:%S%.f")
                        .to_string(),
                ),
                "TIMESTAMPTZ" => {
                    Value::String(row.try_get::<DateTime<Utc>, _>(idx)?.to_rfc3339())
                }
                other => {
                    return Err(StoreError::UnsupportedType {
                        column: column.name().to_owned(),
                        type_name: other.to_owned(),
                    })
                }
            }
        };

        // Later duplicates win, matching `SELECT a.*, b.*` semantics
        out.insert(column.name().to_owned(), value);
    }
    Ok(out)
}

fn float(f: f64) -> Value {
    Number::from_f64(f).map_or(Value::Null, Value::Number)
}
