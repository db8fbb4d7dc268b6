//! User repository

use crate::error::{DbError, Result};
use crate::models::user::validate_email;
use crate::models::{NewUser, UserRecord};
use crate::query::statements;
use crate::store::Store;

use super::decode_first;

/// User repository
pub struct UserRepo<'a> {
    store: &'a dyn Store,
}

impl<'a> UserRepo<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Find a user by email; `None` when no user has it.
    #[tracing::instrument(skip_all, err)]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        validate_email(email)?;
        let rows = self.store.execute(&statements::user_by_email(email)).await?;
        decode_first(rows)
    }

    /// Find a user by id; `None` when it doesn't exist.
    #[tracing::instrument(skip_all, err)]
    pub async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>> {
        let rows = self.store.execute(&statements::user_by_id(id)).await?;
        decode_first(rows)
    }

    /// Insert a user and return the stored row, including its new id.
    #[tracing::instrument(skip_all, err)]
    pub async fn create(&self, user: &NewUser) -> Result<UserRecord> {
        user.validate()?;
        let rows = self.store.execute(&statements::insert_user(user)).await?;
        let created: UserRecord =
            decode_first(rows)?.ok_or(DbError::MissingRow { op: "insert user" })?;
        tracing::info!(user_id = created.id, "user created");
        Ok(created)
    }
}
