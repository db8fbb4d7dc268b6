//! Reservation rows joined with their property

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::PropertyRecord;

/// A guest's reservation with the reserved property and its average rating
///
/// `reservation_id` is aliased in SQL so `properties.id` cannot shadow it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationRecord {
    pub reservation_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub guest_id: i64,
    #[serde(flatten)]
    pub property: PropertyRecord,
    pub average_rating: Option<f64>,
}
