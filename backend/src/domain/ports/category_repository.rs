//! Port abstraction for category persistence adapters.
use async_trait::async_trait;

use crate::domain::{Category, Error};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by category repository adapters.
    pub enum CategoryPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "category repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "category repository query failed: {message}",
    }
    into Error {
        Connection { message } => Error::internal(format!("category repository unavailable: {message}")),
        Query { message } => Error::internal(format!("category repository error: {message}")),
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a new category.
    async fn insert(&self, category: &Category) -> Result<(), CategoryPersistenceError>;

    /// Every category, in insertion order.
    async fn list(&self) -> Result<Vec<Category>, CategoryPersistenceError>;
}
