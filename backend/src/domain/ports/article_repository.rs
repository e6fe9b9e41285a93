//! Port abstraction for article persistence adapters.
use async_trait::async_trait;

use crate::domain::{Error, Article, ArticleId, ArticlePatch, ArticleQuery, CommentId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by article repository adapters.
    pub enum ArticlePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "article repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "article repository query failed: {message}",
    }
    into Error {
        Connection { message } => Error::internal(format!("article repository unavailable: {message}")),
        Query { message } => Error::internal(format!("article repository error: {message}")),
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Insert a new article.
    async fn insert(&self, article: &Article) -> Result<(), ArticlePersistenceError>;

    /// Fetch an article by identifier.
    async fn find_by_id(&self, id: &ArticleId)
    -> Result<Option<Article>, ArticlePersistenceError>;

    /// Fetch every article whose id is listed. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[ArticleId])
    -> Result<Vec<Article>, ArticlePersistenceError>;

    /// Articles matching the query, newest first, at most `query.limit`.
    async fn list(&self, query: &ArticleQuery) -> Result<Vec<Article>, ArticlePersistenceError>;

    /// Apply a patch, returning the updated article or `None` when absent.
    async fn update(
        &self,
        id: &ArticleId,
        patch: &ArticlePatch,
    ) -> Result<Option<Article>, ArticlePersistenceError>;

    /// Delete an article. Returns whether a record was removed.
    async fn delete(&self, id: &ArticleId) -> Result<bool, ArticlePersistenceError>;

    /// Append a comment id to the article's back-reference list.
    ///
    /// Returns `false` when the article does not exist.
    async fn append_comment(
        &self,
        id: &ArticleId,
        comment: &CommentId,
    ) -> Result<bool, ArticlePersistenceError>;
}
