//! Account use-cases: registration, login, profile and administration.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tokio::task::JoinError;
use zeroize::Zeroizing;

use crate::domain::ports::{
    IssuedToken, PasswordHasher, TokenError, TokenService, UserPersistenceError,
    UserRepository, UserService,
};
use crate::domain::{
    ADMINS, Credentials, Email, Error, Identity, MEMBERS, PasswordDigest, Preferences, User,
    UserId, UserValidationError, authorize,
};

/// User service implementing the [`UserService`] driving port.
pub struct UserServiceImpl<R: ?Sized> {
    users: Arc<R>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
    clock: Arc<dyn Clock>,
}

impl<R: ?Sized> Clone for UserServiceImpl<R> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            hasher: Arc::clone(&self.hasher),
            tokens: Arc::clone(&self.tokens),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R: ?Sized> UserServiceImpl<R> {
    /// Create a new service over the given repository and security adapters.
    pub fn new(
        users: Arc<R>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }
}

impl<R: ?Sized> UserServiceImpl<R> {
    // Argon2 is CPU-bound; keep it off the async workers.
    async fn hash_password(&self, password: &str) -> Result<PasswordDigest, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(blocking_task_failed)?
            .map_err(Error::from)
    }

    async fn verify_password(&self, password: &str, digest: &PasswordDigest) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        let digest = digest.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(blocking_task_failed)?
            .map_err(Error::from)
    }
}

fn blocking_task_failed(error: JoinError) -> Error {
    Error::internal(format!("password task failed: {error}"))
}

fn map_email_error(error: UserValidationError) -> Error {
    let code = match error {
        UserValidationError::EmptyEmail => "missing_field",
        UserValidationError::MalformedEmail => "malformed_email",
    };
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": "email",
        "code": code,
    }))
}

fn map_token_error(error: TokenError) -> Error {
    Error::internal(error.to_string())
}

fn user_not_found() -> Error {
    Error::not_found("User not found")
}

#[async_trait]
impl<R> UserService for UserServiceImpl<R>
where
    R: UserRepository + ?Sized,
{
    async fn register(&self, credentials: &Credentials) -> Result<User, Error> {
        let email = Email::new(credentials.email()).map_err(map_email_error)?;
        if self
            .users
            .find_by_email(email.as_ref())
            .await?
            .is_some()
        {
            return Err(UserPersistenceError::duplicate_email(email.as_ref()).into());
        }

        let digest = self.hash_password(credentials.password()).await?;
        let user = User::register(email, digest, self.clock.utc());
        self.users.insert(&user).await?;
        Ok(user)
    }

    async fn login(&self, credentials: &Credentials) -> Result<IssuedToken, Error> {
        let user = self
            .users
            .find_by_email(credentials.email())
            .await?
            .ok_or_else(user_not_found)?;

        let matches = self
            .verify_password(credentials.password(), &user.password_digest)
            .await?;
        if !matches {
            return Err(Error::invalid_credentials("Invalid password"));
        }

        self.tokens
            .issue(&Identity::new(user.id, user.role))
            .map_err(map_token_error)
    }

    async fn current_user(&self, identity: &Identity) -> Result<User, Error> {
        self.users
            .find_by_id(&identity.user_id)
            .await?
            .ok_or_else(user_not_found)
    }

    async fn update_preferences(
        &self,
        identity: &Identity,
        preferences: Preferences,
    ) -> Result<User, Error> {
        authorize(identity, MEMBERS)?;
        self.users
            .update_preferences(&identity.user_id, &preferences)
            .await?
            .ok_or_else(user_not_found)
    }

    async fn list_users(&self, identity: &Identity) -> Result<Vec<User>, Error> {
        authorize(identity, ADMINS)?;
        let users = self.users.list().await?;
        if users.is_empty() {
            return Err(Error::not_found("No users found"));
        }
        Ok(users)
    }

    async fn delete_user(&self, identity: &Identity, id: &UserId) -> Result<(), Error> {
        authorize(identity, ADMINS)?;
        self.users.delete(id).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
