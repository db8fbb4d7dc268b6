//! Property rows, listings, and the insert payload

use serde::{Deserialize, Serialize};

use super::validation::{require_non_negative, require_text};
use super::{serialize_as_dollars, Cents, ValidationError};

/// Property record from database
///
/// `cost_per_night` decodes from the column in whole cents and serializes
/// in dollars, the same unit [`NewProperty`] accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    #[serde(serialize_with = "serialize_as_dollars")]
    pub cost_per_night: Cents,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub country: String,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
}

impl PropertyRecord {
    /// Nightly cost in dollars.
    pub fn cost_per_night_dollars(&self) -> f64 {
        self.cost_per_night.dollars()
    }
}

/// Property with its average review rating, as returned by listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyListing {
    #[serde(flatten)]
    pub property: PropertyRecord,
    pub average_rating: Option<f64>,
}

/// Fields required to insert a property
///
/// `cost_per_night` is in dollars; it is stored as cents.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProperty {
    pub owner_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: f64,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub country: String,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
}

impl NewProperty {
    /// Check the payload before it is bound.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.owner_id <= 0 {
            return Err(ValidationError::OutOfRange {
                field: "owner_id",
                reason: "must be positive",
            });
        }
        require_text("title", &self.title)?;
        require_text("thumbnail_photo_url", &self.thumbnail_photo_url)?;
        require_text("cover_photo_url", &self.cover_photo_url)?;
        Cents::validate_dollars("cost_per_night", self.cost_per_night)?;
        require_text("street", &self.street)?;
        require_text("city", &self.city)?;
        require_text("province", &self.province)?;
        require_text("post_code", &self.post_code)?;
        require_text("country", &self.country)?;
        require_non_negative("parking_spaces", self.parking_spaces)?;
        require_non_negative("number_of_bathrooms", self.number_of_bathrooms)?;
        require_non_negative("number_of_bedrooms", self.number_of_bedrooms)?;
        Ok(())
    }

    /// The nightly cost as it will be stored.
    pub fn cost_in_cents(&self) -> Cents {
        Cents::from_dollars(self.cost_per_night)
    }
}
