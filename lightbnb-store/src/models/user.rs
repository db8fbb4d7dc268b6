//! User rows and the sign-up payload

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::validation::require_text;
use super::ValidationError;

/// One `@`, something on each side, no whitespace.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("invalid email regex"));

/// User record from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// Fields required to insert a user
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    /// Check the payload before it is bound.
    ///
    /// # Rules
    /// - Name and password are non-empty
    /// - Email has the shape `local@domain`
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        validate_email(&self.email)?;
        require_text("password", &self.password)?;
        Ok(())
    }
}

/// Validate an email used for insert or lookup.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    require_text("email", email)?;
    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::InvalidFormat {
            field: "email",
            reason: "must look like local@domain",
        });
    }
    Ok(())
}
