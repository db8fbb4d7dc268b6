//! Validation error types

use std::fmt;

/// Validation error for filters and insert payloads
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field is empty (or only whitespace) when it shouldn't be
    Empty { field: &'static str },

    /// String doesn't match the required format (e.g., email)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Number is outside the accepted range
    OutOfRange { field: &'static str, reason: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::OutOfRange { field, reason } => write!(f, "{} {}", field, reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Reject empty or whitespace-only text.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

/// Reject negative counts (bedrooms, bathrooms, parking spaces).
pub(crate) fn require_non_negative(field: &'static str, value: i32) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::OutOfRange {
            field,
            reason: "cannot be negative",
        });
    }
    Ok(())
}
