//! Statement construction
//!
//! Every statement leaves this module as a [`BuiltQuery`]: SQL text whose
//! only variable parts are `$n` placeholders, plus the values bound to them.
//!
//! - `builder`: clause-fragment builder with automatic placeholder numbering
//! - `properties`: the filtered property listing
//! - `statements`: fixed-shape lookups and inserts

pub mod builder;
pub mod properties;
pub mod statements;

pub use builder::{BuiltQuery, QueryBuilder, SqlValue};
pub use properties::{build_property_query, PropertyFilter};

use crate::models::ValidationError;

/// Result limit used when the caller does not pass one.
pub const DEFAULT_LIMIT: u32 = 10;

/// A limit of zero can never return anything and is treated as a caller bug.
pub fn validate_limit(limit: u32) -> Result<(), ValidationError> {
    if limit == 0 {
        return Err(ValidationError::OutOfRange {
            field: "limit",
            reason: "must be at least 1",
        });
    }
    Ok(())
}
