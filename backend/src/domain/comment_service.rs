//! Commenting and moderation use-cases.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;

use crate::domain::article_service::article_not_found;
use crate::domain::ports::{
    ArticleRepository, CommentRepository, CommentService, UserRepository,
};
use crate::domain::{
    ArticleId, ArticleSummary, Comment, CommentId, CommentListing, EDITORS, Error, Identity,
    MEMBERS, UserSummary, authorize,
};

/// Comment service implementing the [`CommentService`] driving port.
pub struct CommentServiceImpl<C: ?Sized, A: ?Sized, U: ?Sized> {
    comments: Arc<C>,
    articles: Arc<A>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<C: ?Sized, A: ?Sized, U: ?Sized> Clone for CommentServiceImpl<C, A, U> {
    fn clone(&self) -> Self {
        Self {
            comments: Arc::clone(&self.comments),
            articles: Arc::clone(&self.articles),
            users: Arc::clone(&self.users),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C: ?Sized, A: ?Sized, U: ?Sized> CommentServiceImpl<C, A, U> {
    /// Create a new service over the comment, article and user stores.
    pub fn new(comments: Arc<C>, articles: Arc<A>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            comments,
            articles,
            users,
            clock,
        }
    }
}

fn required_content(content: Option<String>) -> Result<String, Error> {
    content.filter(|text| !text.trim().is_empty()).ok_or_else(|| {
        Error::invalid_request("content is required").with_details(json!({
            "field": "content",
            "code": "missing_field",
        }))
    })
}

#[async_trait]
impl<C, A, U> CommentService for CommentServiceImpl<C, A, U>
where
    C: CommentRepository + ?Sized,
    A: ArticleRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    async fn create(
        &self,
        identity: &Identity,
        article: &ArticleId,
        content: Option<String>,
    ) -> Result<Comment, Error> {
        authorize(identity, MEMBERS)?;
        let content = required_content(content)?;
        self.articles
            .find_by_id(article)
            .await?
            .ok_or_else(article_not_found)?;

        let comment = Comment::new(*article, identity.user_id, content, self.clock.utc());
        self.comments.insert(&comment).await?;
        // Not atomic with the insert: a failure here leaves the comment
        // stored but unreferenced.
        let appended = self.articles.append_comment(article, &comment.id).await?;
        if !appended {
            tracing::warn!(
                article = %article,
                comment = %comment.id,
                "article vanished before comment could be attached"
            );
        }
        Ok(comment)
    }

    async fn approve(&self, identity: &Identity, id: &CommentId) -> Result<Comment, Error> {
        authorize(identity, EDITORS)?;
        self.comments
            .approve(id)
            .await?
            .ok_or_else(|| Error::not_found("Comment not found"))
    }

    async fn list_all(&self, identity: &Identity) -> Result<Vec<CommentListing>, Error> {
        authorize(identity, EDITORS)?;
        let comments = self.comments.list_all().await?;

        let mut user_ids: Vec<_> = comments.iter().map(|c| c.user).collect();
        user_ids.sort_unstable();
        user_ids.dedup();
        let mut article_ids: Vec<_> = comments.iter().map(|c| c.article).collect();
        article_ids.sort_unstable();
        article_ids.dedup();

        let authors: HashMap<_, _> = self
            .users
            .find_by_ids(&user_ids)
            .await?
            .iter()
            .map(|user| (user.id, UserSummary::from(user)))
            .collect();
        let articles: HashMap<_, _> = self
            .articles
            .find_by_ids(&article_ids)
            .await?
            .iter()
            .map(|article| (article.id, ArticleSummary::from(article)))
            .collect();

        Ok(comments
            .into_iter()
            .map(|comment| CommentListing {
                author: authors.get(&comment.user).cloned(),
                article: articles.get(&comment.article).cloned(),
                comment,
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "comment_service_tests.rs"]
mod tests;
