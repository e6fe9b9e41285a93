//! PostgreSQL-backed `ArticleRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ArticlePersistenceError, ArticleRepository};
use crate::domain::{Article, ArticleId, ArticlePatch, ArticleQuery, CommentId, Seo};

use super::diesel_helpers::{escape_like, map_diesel_error, map_pool_error};
use super::models::{ArticleChangeset, ArticleRow, NewArticleRow};
use super::pool::{DbPool, PoolError};
use super::schema::articles;

/// Diesel-backed implementation of the [`ArticleRepository`] port.
#[derive(Clone)]
pub struct DieselArticleRepository {
    pool: DbPool,
}

impl DieselArticleRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ArticlePersistenceError {
    map_pool_error(error, ArticlePersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ArticlePersistenceError {
    map_diesel_error(
        error,
        ArticlePersistenceError::query,
        ArticlePersistenceError::connection,
    )
}

fn encode_seo(seo: Option<&Seo>) -> Result<Option<serde_json::Value>, ArticlePersistenceError> {
    seo.map(serde_json::to_value)
        .transpose()
        .map_err(|err| ArticlePersistenceError::query(format!("encode seo: {err}")))
}

fn row_to_article(row: ArticleRow) -> Result<Article, ArticlePersistenceError> {
    let seo = row
        .seo
        .map(serde_json::from_value::<Seo>)
        .transpose()
        .map_err(|err| ArticlePersistenceError::query(format!("stored seo invalid: {err}")))?;
    Ok(Article {
        id: ArticleId::from_uuid(row.id),
        title: row.title,
        author: row.author,
        date: row.published_at,
        category: row.category,
        tags: row.tags,
        content: row.content,
        featured_image: row.featured_image,
        seo,
        comments: row
            .comment_ids
            .into_iter()
            .map(CommentId::from_uuid)
            .collect(),
        created_at: row.created_at,
    })
}

fn rows_to_articles(rows: Vec<ArticleRow>) -> Result<Vec<Article>, ArticlePersistenceError> {
    rows.into_iter().map(row_to_article).collect()
}

fn limit_for_db(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

impl DieselArticleRepository {
    async fn fetch(&self, id: &ArticleId) -> Result<Option<Article>, ArticlePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<ArticleRow> = articles::table
            .find(id.as_uuid())
            .select(ArticleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_article).transpose()
    }
}

#[async_trait]
impl ArticleRepository for DieselArticleRepository {
    async fn insert(&self, article: &Article) -> Result<(), ArticlePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewArticleRow {
            id: *article.id.as_uuid(),
            title: &article.title,
            author: &article.author,
            published_at: article.date,
            category: &article.category,
            tags: &article.tags,
            content: &article.content,
            featured_image: article.featured_image.as_deref(),
            seo: encode_seo(article.seo.as_ref())?,
            comment_ids: article.comments.iter().map(|id| *id.as_uuid()).collect(),
            created_at: article.created_at,
        };

        diesel::insert_into(articles::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_by_id(
        &self,
        id: &ArticleId,
    ) -> Result<Option<Article>, ArticlePersistenceError> {
        self.fetch(id).await
    }

    async fn find_by_ids(
        &self,
        ids: &[ArticleId],
    ) -> Result<Vec<Article>, ArticlePersistenceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<ArticleRow> = articles::table
            .filter(articles::id.eq_any(uuids))
            .select(ArticleRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows_to_articles(rows)
    }

    async fn list(&self, query: &ArticleQuery) -> Result<Vec<Article>, ArticlePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let mut statement = articles::table
            .select(ArticleRow::as_select())
            .into_boxed::<Pg>();
        if let Some(category) = &query.category {
            statement = statement.filter(articles::category.eq(category.clone()));
        }
        if let Some(search) = &query.search {
            statement = statement.filter(articles::title.ilike(format!("%{}%", escape_like(search))));
        }
        let rows: Vec<ArticleRow> = statement
            .order_by(articles::created_at.desc())
            .limit(limit_for_db(query.limit))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows_to_articles(rows)
    }

    async fn update(
        &self,
        id: &ArticleId,
        patch: &ArticlePatch,
    ) -> Result<Option<Article>, ArticlePersistenceError> {
        // Diesel rejects an empty changeset.
        if patch.is_empty() {
            return self.fetch(id).await;
        }
        let changeset = ArticleChangeset {
            title: patch.title.as_deref(),
            author: patch.author.as_deref(),
            published_at: patch.date,
            category: patch.category.as_deref(),
            tags: patch.tags.as_deref(),
            content: patch.content.as_deref(),
            featured_image: patch.featured_image.as_deref(),
            seo: encode_seo(patch.seo.as_ref())?,
        };

        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<ArticleRow> = diesel::update(articles::table.find(id.as_uuid()))
            .set(&changeset)
            .returning(ArticleRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_article).transpose()
    }

    async fn delete(&self, id: &ArticleId) -> Result<bool, ArticlePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(articles::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(removed > 0)
    }

    async fn append_comment(
        &self,
        id: &ArticleId,
        comment: &CommentId,
    ) -> Result<bool, ArticlePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated = diesel::sql_query(
            "UPDATE articles SET comment_ids = array_append(comment_ids, $1) WHERE id = $2",
        )
        .bind::<sql_types::Uuid, _>(*comment.as_uuid())
        .bind::<sql_types::Uuid, _>(*id.as_uuid())
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;
        Ok(updated > 0)
    }
}
