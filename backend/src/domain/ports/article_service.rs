//! Driving port for publishing and reading articles.

use async_trait::async_trait;

use crate::domain::{Article, ArticleId, ArticleInput, ArticleQuery, ArticleView, Error, Identity};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleService: Send + Sync {
    /// Public list with comments resolved inline. Never fails on filters.
    async fn list(&self, query: &ArticleQuery) -> Result<Vec<ArticleView>, Error>;

    /// Public detail with comments and their authors resolved.
    async fn get(&self, id: &ArticleId) -> Result<ArticleView, Error>;

    /// Publish a new article. Admin or editor.
    async fn create(&self, identity: &Identity, input: ArticleInput) -> Result<Article, Error>;

    /// Replace the fields present in `input`. Admin or editor.
    async fn update(
        &self,
        identity: &Identity,
        id: &ArticleId,
        input: ArticleInput,
    ) -> Result<Article, Error>;

    /// Delete an article. Admin only; succeeds whether or not it existed.
    async fn delete(&self, identity: &Identity, id: &ArticleId) -> Result<(), Error>;
}
