//! Error types for lightbnb-store

use thiserror::Error;

use crate::models::ValidationError;
use crate::store::StoreError;

pub type Result<T> = std::result::Result<T, DbError>;

/// Errors surfaced by the repositories.
///
/// A lookup with no matching row is not an error: it comes back as `None`
/// or an empty `Vec`.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    #[error("failed to decode row: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{op} returned no row")]
    MissingRow { op: &'static str },
}

impl DbError {
    /// True when the caller supplied a malformed filter or payload.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, DbError::InvalidArgument(_))
    }
}
