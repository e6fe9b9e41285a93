//! Article use-cases and the public read path.
//!
//! Reads resolve the article's comment back-references at read time. The
//! list path attaches comments only; the detail path also resolves each
//! commenter's email. References that no longer resolve are skipped.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    ArticleRepository, ArticleService, CommentRepository, UserRepository,
};
use crate::domain::{
    ADMINS, Article, ArticleComment, ArticleId, ArticleInput, ArticleQuery, ArticleView, Comment,
    CommentId, CommentVisibility, EDITORS, Error, Identity, UserId, UserSummary, authorize,
};

/// Article service implementing the [`ArticleService`] driving port.
pub struct ArticleServiceImpl<A: ?Sized, C: ?Sized, U: ?Sized> {
    articles: Arc<A>,
    comments: Arc<C>,
    users: Arc<U>,
    visibility: CommentVisibility,
    clock: Arc<dyn Clock>,
}

impl<A: ?Sized, C: ?Sized, U: ?Sized> Clone for ArticleServiceImpl<A, C, U> {
    fn clone(&self) -> Self {
        Self {
            articles: Arc::clone(&self.articles),
            comments: Arc::clone(&self.comments),
            users: Arc::clone(&self.users),
            visibility: self.visibility,
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<A: ?Sized, C: ?Sized, U: ?Sized> ArticleServiceImpl<A, C, U> {
    /// Create a new service. `visibility` governs which comments public reads
    /// return.
    pub fn new(
        articles: Arc<A>,
        comments: Arc<C>,
        users: Arc<U>,
        visibility: CommentVisibility,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            articles,
            comments,
            users,
            visibility,
            clock,
        }
    }
}

pub(crate) fn article_not_found() -> Error {
    Error::not_found("Article not found")
}

impl<A, C, U> ArticleServiceImpl<A, C, U>
where
    A: ArticleRepository + ?Sized,
    C: CommentRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    async fn visible_comments(&self, ids: &[CommentId]) -> Result<Vec<Comment>, Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let comments = self.comments.find_by_ids(ids).await?;
        Ok(comments
            .into_iter()
            .filter(|comment| self.visibility.shows(comment))
            .collect())
    }

    async fn authors(&self, comments: &[Comment]) -> Result<HashMap<UserId, UserSummary>, Error> {
        let mut ids: Vec<UserId> = comments.iter().map(|comment| comment.user).collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let users = self.users.find_by_ids(&ids).await?;
        Ok(users
            .iter()
            .map(|user| (user.id, UserSummary::from(user)))
            .collect())
    }
}

#[async_trait]
impl<A, C, U> ArticleService for ArticleServiceImpl<A, C, U>
where
    A: ArticleRepository + ?Sized,
    C: CommentRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    async fn list(&self, query: &ArticleQuery) -> Result<Vec<ArticleView>, Error> {
        let articles = self.articles.list(query).await?;
        let ids: Vec<CommentId> = articles
            .iter()
            .flat_map(|article| article.comments.iter().copied())
            .collect();
        let mut by_id: HashMap<CommentId, Comment> = self
            .visible_comments(&ids)
            .await?
            .into_iter()
            .map(|comment| (comment.id, comment))
            .collect();

        Ok(articles
            .into_iter()
            .map(|article| {
                let comments = article
                    .comments
                    .iter()
                    .filter_map(|id| by_id.remove(id))
                    .map(|comment| ArticleComment {
                        comment,
                        author: None,
                    })
                    .collect();
                ArticleView { article, comments }
            })
            .collect())
    }

    async fn get(&self, id: &ArticleId) -> Result<ArticleView, Error> {
        let article = self
            .articles
            .find_by_id(id)
            .await?
            .ok_or_else(article_not_found)?;
        let comments = self.visible_comments(&article.comments).await?;
        let authors = self.authors(&comments).await?;
        let comments = comments
            .into_iter()
            .map(|comment| {
                let author = authors.get(&comment.user).cloned();
                ArticleComment { comment, author }
            })
            .collect();
        Ok(ArticleView { article, comments })
    }

    async fn create(&self, identity: &Identity, input: ArticleInput) -> Result<Article, Error> {
        authorize(identity, EDITORS)?;
        let article = input.into_article(self.clock.utc())?;
        self.articles
            .insert(&article)
            .await?;
        Ok(article)
    }

    async fn update(
        &self,
        identity: &Identity,
        id: &ArticleId,
        input: ArticleInput,
    ) -> Result<Article, Error> {
        authorize(identity, EDITORS)?;
        let patch = input.into_patch()?;
        self.articles
            .update(id, &patch)
            .await?
            .ok_or_else(article_not_found)
    }

    async fn delete(&self, identity: &Identity, id: &ArticleId) -> Result<(), Error> {
        authorize(identity, ADMINS)?;
        self.articles.delete(id).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "article_service_tests.rs"]
mod tests;
