//! Integer cents at rest, decimal currency at the edge.
//!
//! `cost_per_night` and the price filters are stored and bound as whole
//! cents. Callers speak dollars; [`Cents::from_dollars`] and
//! [`Cents::dollars`] are the only places the two meet, on the write path
//! and the read path alike.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Largest amount that fits the `integer` cost column, in cents.
const MAX_CENTS: i64 = i32::MAX as i64;

/// A monetary amount in whole cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(i64);

impl Cents {
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Convert a dollar amount to cents, rounding to the nearest cent.
    ///
    /// Assumes the amount already passed [`Cents::validate_dollars`].
    ///
    /// # Example
    /// ```
    /// use lightbnb_store::Cents;
    ///
    /// assert_eq!(Cents::from_dollars(150.0).cents(), 15000);
    /// assert_eq!(Cents::from_dollars(99.99).cents(), 9999);
    /// ```
    pub fn from_dollars(dollars: f64) -> Self {
        Self((dollars * 100.0).round() as i64)
    }

    /// Check that a dollar amount can be stored.
    pub fn validate_dollars(field: &'static str, dollars: f64) -> Result<(), ValidationError> {
        if !dollars.is_finite() {
            return Err(ValidationError::OutOfRange {
                field,
                reason: "must be a finite number",
            });
        }
        if dollars < 0.0 {
            return Err(ValidationError::OutOfRange {
                field,
                reason: "cannot be negative",
            });
        }
        if (dollars * 100.0).round() > MAX_CENTS as f64 {
            return Err(ValidationError::OutOfRange {
                field,
                reason: "exceeds the maximum storable amount",
            });
        }
        Ok(())
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    pub fn dollars(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

/// Serialize an amount stored as cents as dollars.
///
/// For record fields: rows decode from cents, output leaves in dollars.
pub fn serialize_as_dollars<S>(amount: &Cents, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(amount.dollars())
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}
