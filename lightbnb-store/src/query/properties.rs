//! Filtered property listing
//!
//! Filters are applied in a fixed order (city, owner, minimum price,
//! maximum price) so placeholder numbering is deterministic. The rating
//! filter runs after aggregation, in HAVING.

use serde::{Deserialize, Serialize};

use super::{BuiltQuery, QueryBuilder};
use crate::models::{Cents, ValidationError};

const BASE_SELECT: &str = "SELECT properties.*, avg(property_reviews.rating)::float8 AS average_rating
FROM properties
JOIN property_reviews ON properties.id = property_reviews.property_id";

/// Optional search criteria for a property listing
///
/// A field takes part in the query when it is `Some`, including zero
/// values such as a minimum price of `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyFilter {
    /// Partial, case-insensitive city match
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub owner_id: Option<i64>,
    /// Dollars
    #[serde(default)]
    pub minimum_price_per_night: Option<f64>,
    /// Dollars
    #[serde(default)]
    pub maximum_price_per_night: Option<f64>,
    #[serde(default)]
    pub minimum_rating: Option<f64>,
}

impl PropertyFilter {
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn owner(mut self, owner_id: i64) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn min_price(mut self, dollars: f64) -> Self {
        self.minimum_price_per_night = Some(dollars);
        self
    }

    pub fn max_price(mut self, dollars: f64) -> Self {
        self.maximum_price_per_night = Some(dollars);
        self
    }

    pub fn min_rating(mut self, rating: f64) -> Self {
        self.minimum_rating = Some(rating);
        self
    }

    /// Number of filters applied before aggregation.
    pub fn where_count(&self) -> usize {
        [
            self.city.is_some(),
            self.owner_id.is_some(),
            self.minimum_price_per_night.is_some(),
            self.maximum_price_per_night.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    /// Reject malformed values before a statement is built.
    ///
    /// A minimum above the maximum is allowed; it just matches nothing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(city) = &self.city {
            if city.trim().is_empty() {
                return Err(ValidationError::Empty { field: "city" });
            }
        }
        if let Some(min) = self.minimum_price_per_night {
            Cents::validate_dollars("minimum_price_per_night", min)?;
        }
        if let Some(max) = self.maximum_price_per_night {
            Cents::validate_dollars("maximum_price_per_night", max)?;
        }
        if let Some(rating) = self.minimum_rating {
            if !rating.is_finite() {
                return Err(ValidationError::OutOfRange {
                    field: "minimum_rating",
                    reason: "must be a finite number",
                });
            }
            if rating < 0.0 {
                return Err(ValidationError::OutOfRange {
                    field: "minimum_rating",
                    reason: "cannot be negative",
                });
            }
        }
        Ok(())
    }
}

/// Build the listing statement for `filter`, cheapest first.
///
/// Prices are bound as cents, the city as a `%city%` pattern, everything
/// else unchanged. The limit is always the last parameter.
///
/// # Example
/// ```
/// use lightbnb_store::{build_property_query, PropertyFilter, SqlValue};
///
/// let q = build_property_query(&PropertyFilter::default().city("Van").min_rating(4.0), 5);
/// assert_eq!(
///     q.params(),
///     &[SqlValue::Text("%Van%".into()), SqlValue::Float(4.0), SqlValue::Int(5)]
/// );
/// ```
pub fn build_property_query(filter: &PropertyFilter, limit: u32) -> BuiltQuery {
    let mut query = QueryBuilder::new(BASE_SELECT);

    if let Some(city) = &filter.city {
        query.and_where("properties.city", "ILIKE", format!("%{}%", city));
    }
    if let Some(owner_id) = filter.owner_id {
        query.and_where("properties.owner_id", "=", owner_id);
    }
    if let Some(min) = filter.minimum_price_per_night {
        query.and_where(
            "properties.cost_per_night",
            ">=",
            Cents::from_dollars(min).cents(),
        );
    }
    if let Some(max) = filter.maximum_price_per_night {
        query.and_where(
            "properties.cost_per_night",
            "<=",
            Cents::from_dollars(max).cents(),
        );
    }

    query.push("GROUP BY properties.id");

    // Postgres does not resolve the average_rating alias inside HAVING.
    if let Some(rating) = filter.minimum_rating {
        query.having("avg(property_reviews.rating)", ">=", rating);
    }

    query.push("ORDER BY properties.cost_per_night");
    query.limit(limit);
    query.build()
}
