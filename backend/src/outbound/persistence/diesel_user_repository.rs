//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{ArticleId, Email, PasswordDigest, Preferences, Role, User, UserId};

use super::diesel_helpers::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
///
/// Email uniqueness is enforced by the `users_email_key` constraint and
/// surfaces as [`UserPersistenceError::DuplicateEmail`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, UserPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn encode_preferences(preferences: &Preferences) -> Result<serde_json::Value, UserPersistenceError> {
    serde_json::to_value(preferences)
        .map_err(|err| UserPersistenceError::query(format!("encode preferences: {err}")))
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let email = Email::new(row.email)
        .map_err(|err| UserPersistenceError::query(format!("stored email invalid: {err}")))?;
    let role: Role = row
        .role
        .parse()
        .map_err(|err| UserPersistenceError::query(format!("stored role invalid: {err}")))?;
    let preferences: Preferences = serde_json::from_value(row.preferences)
        .map_err(|err| UserPersistenceError::query(format!("stored preferences invalid: {err}")))?;
    Ok(User {
        id: UserId::from_uuid(row.id),
        email,
        password_digest: PasswordDigest::new(row.password_hash),
        role,
        preferences,
        bookmarks: row.bookmarks.into_iter().map(ArticleId::from_uuid).collect(),
        created_at: row.created_at,
    })
}

fn rows_to_users(rows: Vec<UserRow>) -> Result<Vec<User>, UserPersistenceError> {
    rows.into_iter().map(row_to_user).collect()
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewUserRow {
            id: *user.id.as_uuid(),
            email: user.email.as_ref(),
            password_hash: user.password_digest.as_phc(),
            role: user.role.as_str(),
            preferences: encode_preferences(&user.preferences)?,
            bookmarks: user.bookmarks.iter().map(|id| *id.as_uuid()).collect(),
            created_at: user.created_at,
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    UserPersistenceError::duplicate_email(user.email.as_ref())
                } else {
                    diesel_error(err)
                }
            })
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<UserRow> = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<UserRow> = users::table
            .filter(users::id.eq_any(uuids))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows_to_users(rows)
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order_by(users::created_at.asc())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows_to_users(rows)
    }

    async fn update_preferences(
        &self,
        id: &UserId,
        preferences: &Preferences,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<UserRow> = diesel::update(users::table.find(id.as_uuid()))
            .set(users::preferences.eq(encode_preferences(preferences)?))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(users::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(removed > 0)
    }
}
