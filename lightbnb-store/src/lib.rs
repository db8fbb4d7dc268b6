//! lightbnb-store: Postgres data access for LightBnB
//!
//! Translates application queries (find a user, list a guest's
//! reservations, search properties, insert records) into parameterized
//! SQL and maps result rows back into plain records.
//!
//! ## Architecture
//!
//! ```text
//! PropertyFilter ─┐
//! NewUser ────────┼─ validate ─→ query::* ─→ BuiltQuery ─→ Store::execute ─→ Row ─→ records
//! NewProperty ────┘
//! ```

pub mod error;
pub mod models;
pub mod query;
pub mod repos;
pub mod store;

pub use error::{DbError, Result};
pub use models::{
    Cents, NewProperty, NewUser, PropertyListing, PropertyRecord, ReservationRecord, UserRecord,
    ValidationError,
};
pub use query::{build_property_query, BuiltQuery, PropertyFilter, QueryBuilder, SqlValue, DEFAULT_LIMIT};
pub use repos::{PropertyRepo, ReservationRepo, UserRepo};
pub use store::{PgStore, Row, Store, StoreConfig, StoreError};
