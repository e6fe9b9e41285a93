//! PostgreSQL-backed `CommentRepository` implementation using Diesel ORM.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{CommentPersistenceError, CommentRepository};
use crate::domain::{ArticleId, Comment, CommentId, UserId};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::CommentRow;
use super::pool::{DbPool, PoolError};
use super::schema::comments;

/// Diesel-backed implementation of the [`CommentRepository`] port.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> CommentPersistenceError {
    map_pool_error(error, CommentPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> CommentPersistenceError {
    map_diesel_error(
        error,
        CommentPersistenceError::query,
        CommentPersistenceError::connection,
    )
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: CommentId::from_uuid(row.id),
            article: ArticleId::from_uuid(row.article_id),
            user: UserId::from_uuid(row.user_id),
            content: row.content,
            date: row.posted_at,
            approved: row.approved,
        }
    }
}

impl From<&Comment> for CommentRow {
    fn from(comment: &Comment) -> Self {
        Self {
            id: *comment.id.as_uuid(),
            article_id: *comment.article.as_uuid(),
            user_id: *comment.user.as_uuid(),
            content: comment.content.clone(),
            posted_at: comment.date,
            approved: comment.approved,
        }
    }
}

/// Reorder `rows` to follow `ids`, dropping ids with no row.
fn in_requested_order(ids: &[CommentId], rows: Vec<CommentRow>) -> Vec<Comment> {
    let mut by_id: HashMap<Uuid, CommentRow> = rows.into_iter().map(|row| (row.id, row)).collect();
    ids.iter()
        .filter_map(|id| by_id.remove(id.as_uuid()))
        .map(Comment::from)
        .collect()
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn insert(&self, comment: &Comment) -> Result<(), CommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(comments::table)
            .values(CommentRow::from(comment))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_by_ids(
        &self,
        ids: &[CommentId],
    ) -> Result<Vec<Comment>, CommentPersistenceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<CommentRow> = comments::table
            .filter(comments::id.eq_any(uuids))
            .select(CommentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(in_requested_order(ids, rows))
    }

    async fn list_all(&self) -> Result<Vec<Comment>, CommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<CommentRow> = comments::table
            .select(CommentRow::as_select())
            .order_by(comments::posted_at.asc())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn approve(&self, id: &CommentId) -> Result<Option<Comment>, CommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<CommentRow> = diesel::update(comments::table.find(id.as_uuid()))
            .set(comments::approved.eq(true))
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(Comment::from))
    }
}
