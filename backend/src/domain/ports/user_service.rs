//! Driving port for account use-cases.
//!
//! Inbound adapters call this port with validated credentials or a decoded
//! [`Identity`]; role checks happen behind it.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, Identity, Preferences, User, UserId};

use super::IssuedToken;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a `registered` account.
    async fn register(&self, credentials: &Credentials) -> Result<User, Error>;

    /// Check credentials and issue a bearer token.
    async fn login(&self, credentials: &Credentials) -> Result<IssuedToken, Error>;

    /// Profile of the caller.
    async fn current_user(&self, identity: &Identity) -> Result<User, Error>;

    /// Replace the caller's preferences wholesale.
    async fn update_preferences(
        &self,
        identity: &Identity,
        preferences: Preferences,
    ) -> Result<User, Error>;

    /// Every account. Admin only.
    async fn list_users(&self, identity: &Identity) -> Result<Vec<User>, Error>;

    /// Delete an account by id. Admin only; succeeds whether or not the
    /// account existed.
    async fn delete_user(&self, identity: &Identity, id: &UserId) -> Result<(), Error>;
}
