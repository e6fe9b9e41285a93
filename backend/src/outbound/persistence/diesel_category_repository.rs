//! PostgreSQL-backed `CategoryRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CategoryPersistenceError, CategoryRepository};
use crate::domain::{Category, CategoryId};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{CategoryRow, NewCategoryRow};
use super::pool::{DbPool, PoolError};
use super::schema::categories;

/// Diesel-backed implementation of the [`CategoryRepository`] port.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> CategoryPersistenceError {
    map_pool_error(error, CategoryPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> CategoryPersistenceError {
    map_diesel_error(
        error,
        CategoryPersistenceError::query,
        CategoryPersistenceError::connection,
    )
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn insert(&self, category: &Category) -> Result<(), CategoryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewCategoryRow {
            id: *category.id.as_uuid(),
            name: &category.name,
            description: &category.description,
        };
        diesel::insert_into(categories::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn list(&self) -> Result<Vec<Category>, CategoryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<CategoryRow> = categories::table
            .select(CategoryRow::as_select())
            .order_by(categories::created_at.asc())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows
            .into_iter()
            .map(|row| Category {
                id: CategoryId::from_uuid(row.id),
                name: row.name,
                description: row.description,
            })
            .collect())
    }
}
