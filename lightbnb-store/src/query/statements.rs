//! Fixed-shape statements: one shape, no branching.

use super::BuiltQuery;
use crate::models::{NewProperty, NewUser};

const USER_BY_EMAIL: &str = r#"
SELECT * FROM users
WHERE users.email = $1
"#;

const USER_BY_ID: &str = r#"
SELECT * FROM users
WHERE users.id = $1
"#;

const INSERT_USER: &str = r#"
INSERT INTO users (name, email, password)
VALUES ($1, $2, $3)
RETURNING *
"#;

const GUEST_RESERVATIONS: &str = r#"
SELECT
    reservations.id AS reservation_id,
    reservations.start_date,
    reservations.end_date,
    reservations.guest_id,
    properties.*,
    avg(property_reviews.rating)::float8 AS average_rating
FROM reservations
JOIN properties ON properties.id = reservations.property_id
JOIN property_reviews ON properties.id = property_reviews.property_id
WHERE reservations.guest_id = $1
GROUP BY reservations.id, properties.id
ORDER BY reservations.start_date
LIMIT $2
"#;

const INSERT_PROPERTY: &str = r#"
INSERT INTO properties (
    owner_id,
    title,
    description,
    thumbnail_photo_url,
    cover_photo_url,
    cost_per_night,
    street,
    city,
    province,
    post_code,
    country,
    parking_spaces,
    number_of_bathrooms,
    number_of_bedrooms
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
RETURNING *
"#;

pub fn user_by_email(email: &str) -> BuiltQuery {
    BuiltQuery::new(USER_BY_EMAIL.trim(), vec![email.into()])
}

pub fn user_by_id(id: i64) -> BuiltQuery {
    BuiltQuery::new(USER_BY_ID.trim(), vec![id.into()])
}

pub fn insert_user(user: &NewUser) -> BuiltQuery {
    BuiltQuery::new(
        INSERT_USER.trim(),
        vec![
            user.name.as_str().into(),
            user.email.as_str().into(),
            user.password.as_str().into(),
        ],
    )
}

pub fn guest_reservations(guest_id: i64, limit: u32) -> BuiltQuery {
    BuiltQuery::new(GUEST_RESERVATIONS.trim(), vec![guest_id.into(), limit.into()])
}

/// `cost_per_night` is converted to cents here, on the way in.
pub fn insert_property(property: &NewProperty) -> BuiltQuery {
    BuiltQuery::new(
        INSERT_PROPERTY.trim(),
        vec![
            property.owner_id.into(),
            property.title.as_str().into(),
            property.description.as_deref().into(),
            property.thumbnail_photo_url.as_str().into(),
            property.cover_photo_url.as_str().into(),
            property.cost_in_cents().cents().into(),
            property.street.as_str().into(),
            property.city.as_str().into(),
            property.province.as_str().into(),
            property.post_code.as_str().into(),
            property.country.as_str().into(),
            property.parking_spaces.into(),
            property.number_of_bathrooms.into(),
            property.number_of_bedrooms.into(),
        ],
    )
}
