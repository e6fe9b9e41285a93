//! Category use-cases.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{CategoryRepository, CategoryService};
use crate::domain::{ADMINS, Category, CategoryInput, Error, Identity, authorize};

/// Category service implementing the [`CategoryService`] driving port.
pub struct CategoryServiceImpl<R: ?Sized> {
    categories: Arc<R>,
}

impl<R: ?Sized> Clone for CategoryServiceImpl<R> {
    fn clone(&self) -> Self {
        Self {
            categories: Arc::clone(&self.categories),
        }
    }
}

impl<R: ?Sized> CategoryServiceImpl<R> {
    /// Create a new service with the given repository.
    pub fn new(categories: Arc<R>) -> Self {
        Self { categories }
    }
}

#[async_trait]
impl<R> CategoryService for CategoryServiceImpl<R>
where
    R: CategoryRepository + ?Sized,
{
    async fn list(&self) -> Result<Vec<Category>, Error> {
        self.categories.list().await.map_err(Error::from)
    }

    async fn create(&self, identity: &Identity, input: CategoryInput) -> Result<Category, Error> {
        authorize(identity, ADMINS)?;
        let category = input.into_category()?;
        self.categories
            .insert(&category)
            .await?;
        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{CategoryPersistenceError, MockCategoryRepository};
    use crate::domain::{ErrorCode, Role, UserId};
    use rstest::rstest;

    fn service(repo: MockCategoryRepository) -> CategoryServiceImpl<MockCategoryRepository> {
        CategoryServiceImpl::new(Arc::new(repo))
    }

    #[rstest]
    #[tokio::test]
    async fn admins_create_categories() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_insert()
            .withf(|category: &Category| category.name == "Sports")
            .times(1)
            .return_once(|_| Ok(()));

        let created = service(repo)
            .create(
                &Identity::new(UserId::random(), Role::Admin),
                CategoryInput {
                    name: Some("Sports".to_owned()),
                    description: None,
                },
            )
            .await
            .expect("created");
        assert_eq!(created.description, "");
    }

    #[rstest]
    #[tokio::test]
    async fn editors_cannot_create_categories() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_insert().never();

        let err = service(repo)
            .create(
                &Identity::new(UserId::random(), Role::Editor),
                CategoryInput {
                    name: Some("Sports".to_owned()),
                    description: None,
                },
            )
            .await
            .expect_err("forbidden");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    #[tokio::test]
    async fn list_propagates_store_failures() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_list()
            .return_once(|| Err(CategoryPersistenceError::connection("refused")));

        let err = service(repo).list().await.expect_err("down");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
