//! Property repository

use crate::error::{DbError, Result};
use crate::models::{NewProperty, PropertyListing, PropertyRecord};
use crate::query::{build_property_query, statements, validate_limit, PropertyFilter};
use crate::store::Store;

use super::{decode_all, decode_first};

/// Property repository
pub struct PropertyRepo<'a> {
    store: &'a dyn Store,
}

impl<'a> PropertyRepo<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// List properties matching `filter`, cheapest first.
    ///
    /// Malformed filter values are rejected before any statement is built.
    #[tracing::instrument(
        skip_all,
        fields(
            predicates = filter.where_count(),
            having = filter.minimum_rating.is_some(),
            limit = limit
        ),
        err
    )]
    pub async fn list(&self, filter: &PropertyFilter, limit: u32) -> Result<Vec<PropertyListing>> {
        filter.validate()?;
        validate_limit(limit)?;

        let query = build_property_query(filter, limit);
        tracing::debug!(
            predicates = filter.where_count(),
            having = filter.minimum_rating.is_some(),
            params = query.params().len(),
            "built property listing"
        );

        let rows = self.store.execute(&query).await?;
        decode_all(rows)
    }

    /// Insert a property and return the stored row.
    ///
    /// The nightly cost is stored in cents; read it back with
    /// [`PropertyRecord::cost_per_night_dollars`].
    #[tracing::instrument(skip_all, fields(owner_id = property.owner_id), err)]
    pub async fn create(&self, property: &NewProperty) -> Result<PropertyRecord> {
        property.validate()?;
        let rows = self
            .store
            .execute(&statements::insert_property(property))
            .await?;
        let created: PropertyRecord =
            decode_first(rows)?.ok_or(DbError::MissingRow { op: "insert property" })?;
        tracing::info!(property_id = created.id, "property created");
        Ok(created)
    }
}
