//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;
use serde_json::json;

use crate::domain::{Error, Preferences, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses the email address.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
    into Error {
        Connection { message } => Error::internal(format!("user repository unavailable: {message}")),
        Query { message } => Error::internal(format!("user repository error: {message}")),
        DuplicateEmail { .. } => Error::invalid_request("Email already registered").with_details(json!({
            "field": "email",
            "code": "duplicate_email",
        })),
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Fails with `DuplicateEmail` when the email is taken.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch every user whose id is listed. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError>;

    /// Every stored user.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Replace a user's preferences, returning the updated record.
    async fn update_preferences(
        &self,
        id: &UserId,
        preferences: &Preferences,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Delete a user. Returns whether a record was removed.
    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError>;
}
