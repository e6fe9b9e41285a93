//! Driving port for commenting and moderation.

use async_trait::async_trait;

use crate::domain::{ArticleId, Comment, CommentId, CommentListing, Error, Identity};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentService: Send + Sync {
    /// Comment on an article as the caller. The comment starts unapproved and
    /// is appended to the article's comment list.
    async fn create(
        &self,
        identity: &Identity,
        article: &ArticleId,
        content: Option<String>,
    ) -> Result<Comment, Error>;

    /// Mark a comment approved. Admin or editor; idempotent.
    async fn approve(&self, identity: &Identity, id: &CommentId) -> Result<Comment, Error>;

    /// Every comment with author and article resolved. Admin or editor.
    async fn list_all(&self, identity: &Identity) -> Result<Vec<CommentListing>, Error>;
}
