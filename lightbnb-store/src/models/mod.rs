//! Record shapes and insert payloads
//!
//! Payloads are validated before a statement is built.
//! Invalid input returns ValidationError, not a store round-trip.

pub mod money;
pub mod property;
pub mod reservation;
pub mod user;
pub mod validation;

pub use money::{serialize_as_dollars, Cents};
pub use property::{NewProperty, PropertyListing, PropertyRecord};
pub use reservation::ReservationRecord;
pub use user::{NewUser, UserRecord};
pub use validation::ValidationError;
