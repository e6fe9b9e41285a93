//! Port abstraction for comment persistence adapters.
use async_trait::async_trait;

use crate::domain::{Error, Comment, CommentId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by comment repository adapters.
    pub enum CommentPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "comment repository query failed: {message}",
    }
    into Error {
        Connection { message } => Error::internal(format!("comment repository unavailable: {message}")),
        Query { message } => Error::internal(format!("comment repository error: {message}")),
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert a new comment.
    async fn insert(&self, comment: &Comment) -> Result<(), CommentPersistenceError>;

    /// Fetch comments by id, preserving the order of `ids`. Unknown ids are
    /// skipped.
    async fn find_by_ids(&self, ids: &[CommentId])
    -> Result<Vec<Comment>, CommentPersistenceError>;

    /// Every stored comment, oldest first.
    async fn list_all(&self) -> Result<Vec<Comment>, CommentPersistenceError>;

    /// Mark a comment approved, returning it or `None` when absent.
    async fn approve(&self, id: &CommentId) -> Result<Option<Comment>, CommentPersistenceError>;
}
