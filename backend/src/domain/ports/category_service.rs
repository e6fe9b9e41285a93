//! Driving port for categories.

use async_trait::async_trait;

use crate::domain::{Category, CategoryInput, Error, Identity};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryService: Send + Sync {
    /// Every category.
    async fn list(&self) -> Result<Vec<Category>, Error>;

    /// Create a category. Admin only.
    async fn create(&self, identity: &Identity, input: CategoryInput) -> Result<Category, Error>;
}
