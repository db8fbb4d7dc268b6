//! Repositories - one statement per operation
//!
//! Each repository follows these patterns:
//! - Validates input before building a statement
//! - Issues exactly one statement through the borrowed [`Store`](crate::store::Store)
//! - Zero matching rows is `None` / empty, never an error
//! - Store failures propagate to the caller unchanged

pub mod properties;
pub mod reservations;
pub mod users;

pub use properties::PropertyRepo;
pub use reservations::ReservationRepo;
pub use users::UserRepo;

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::store::Row;

fn decode<T: DeserializeOwned>(row: Row) -> Result<T> {
    Ok(serde_json::from_value(serde_json::Value::Object(row))?)
}

fn decode_all<T: DeserializeOwned>(rows: Vec<Row>) -> Result<Vec<T>> {
    rows.into_iter().map(decode).collect()
}

fn decode_first<T: DeserializeOwned>(rows: Vec<Row>) -> Result<Option<T>> {
    rows.into_iter().next().map(decode).transpose()
}
