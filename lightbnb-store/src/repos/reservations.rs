//! Reservation repository

use crate::error::Result;
use crate::models::ReservationRecord;
use crate::query::{statements, validate_limit};
use crate::store::Store;

use super::decode_all;

/// Reservation repository
pub struct ReservationRepo<'a> {
    store: &'a dyn Store,
}

impl<'a> ReservationRepo<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// A guest's reservations with property details and average rating,
    /// earliest first.
    ///
    /// Store failures are returned, not logged and dropped.
    #[tracing::instrument(skip_all, fields(limit = limit), err)]
    pub async fn list_for_guest(&self, guest_id: i64, limit: u32) -> Result<Vec<ReservationRecord>> {
        validate_limit(limit)?;
        let rows = self
            .store
            .execute(&statements::guest_reservations(guest_id, limit))
            .await?;
        decode_all(rows)
    }
}
