//! Store collaborator - executes a statement, returns rows
//!
//! Repositories depend on the [`Store`] trait only. [`PgStore`] is the
//! Postgres implementation; it is constructed explicitly at process start
//! and closed at shutdown.

pub mod config;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::query::BuiltQuery;

pub use config::{ConnectionTarget, StoreConfig};
pub use postgres::PgStore;

/// One result row, keyed by column name
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Failure reported by the underlying store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("unsupported column type {type_name} for column '{column}'")]
    UnsupportedType { column: String, type_name: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Backend(String),
}

/// Executes one parameterized statement.
///
/// Each call is independent: no transactions, no retries.
#[async_trait]
pub trait Store: Send + Sync {
    async fn execute(&self, query: &BuiltQuery) -> Result<Vec<Row>, StoreError>;
}
