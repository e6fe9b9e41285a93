//! In-process document store.
//!
//! Implements every repository port over plain vectors guarded by one async
//! `RwLock`. Used when no database URL is configured and by tests that
//! exercise the full HTTP stack. Each port operation takes the lock once, so
//! the two writes of comment creation are not atomic here either.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{
    ArticlePersistenceError, ArticleRepository, CategoryPersistenceError, CategoryRepository,
    CommentPersistenceError, CommentRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Article, ArticleId, ArticlePatch, ArticleQuery, Category, Comment, CommentId, Preferences,
    User, UserId,
};

#[derive(Debug, Default)]
struct Collections {
    users: Vec<User>,
    articles: Vec<Article>,
    comments: Vec<Comment>,
    categories: Vec<Category>,
}

/// Document store held in process memory. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn pick<T: Clone, K: PartialEq>(items: &[T], ids: &[K], key: impl Fn(&T) -> &K) -> Vec<T> {
    ids.iter()
        .filter_map(|id| items.iter().find(|item| key(item) == id))
        .cloned()
        .collect()
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut guard = self.inner.write().await;
        if guard.users.iter().any(|existing| existing.email == user.email) {
            return Err(UserPersistenceError::duplicate_email(user.email.as_ref()));
        }
        guard.users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let guard = self.inner.read().await;
        Ok(guard.users.iter().find(|user| user.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let guard = self.inner.read().await;
        Ok(guard
            .users
            .iter()
            .find(|user| user.email.as_ref() == email)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        let guard = self.inner.read().await;
        Ok(pick(&guard.users, ids, |user| &user.id))
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.inner.read().await.users.clone())
    }

    async fn update_preferences(
        &self,
        id: &UserId,
        preferences: &Preferences,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut guard = self.inner.write().await;
        Ok(guard.users.iter_mut().find(|user| user.id == *id).map(|user| {
            user.preferences = preferences.clone();
            user.clone()
        }))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut guard = self.inner.write().await;
        let before = guard.users.len();
        guard.users.retain(|user| user.id != *id);
        Ok(guard.users.len() < before)
    }
}

#[async_trait]
impl ArticleRepository for MemoryStore {
    async fn insert(&self, article: &Article) -> Result<(), ArticlePersistenceError> {
        self.inner.write().await.articles.push(article.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ArticleId,
    ) -> Result<Option<Article>, ArticlePersistenceError> {
        let guard = self.inner.read().await;
        Ok(guard.articles.iter().find(|a| a.id == *id).cloned())
    }

    async fn find_by_ids(
        &self,
        ids: &[ArticleId],
    ) -> Result<Vec<Article>, ArticlePersistenceError> {
        let guard = self.inner.read().await;
        Ok(pick(&guard.articles, ids, |article| &article.id))
    }

    async fn list(&self, query: &ArticleQuery) -> Result<Vec<Article>, ArticlePersistenceError> {
        let guard = self.inner.read().await;
        let mut matching: Vec<Article> = guard
            .articles
            .iter()
            .filter(|article| query.matches(article))
            .cloned()
            .collect();
        // Stable sort keeps insertion order among equal timestamps, so reverse
        // first to put later inserts ahead.
        matching.reverse();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.truncate(query.limit);
        Ok(matching)
    }

    async fn update(
        &self,
        id: &ArticleId,
        patch: &ArticlePatch,
    ) -> Result<Option<Article>, ArticlePersistenceError> {
        let mut guard = self.inner.write().await;
        Ok(guard.articles.iter_mut().find(|a| a.id == *id).map(|article| {
            patch.apply_to(article);
            article.clone()
        }))
    }

    async fn delete(&self, id: &ArticleId) -> Result<bool, ArticlePersistenceError> {
        let mut guard = self.inner.write().await;
        let before = guard.articles.len();
        guard.articles.retain(|article| article.id != *id);
        Ok(guard.articles.len() < before)
    }

    async fn append_comment(
        &self,
        id: &ArticleId,
        comment: &CommentId,
    ) -> Result<bool, ArticlePersistenceError> {
        let mut guard = self.inner.write().await;
        Ok(match guard.articles.iter_mut().find(|a| a.id == *id) {
            Some(article) => {
                article.comments.push(*comment);
                true
            }
            None => false,
        })
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn insert(&self, comment: &Comment) -> Result<(), CommentPersistenceError> {
        self.inner.write().await.comments.push(comment.clone());
        Ok(())
    }

    async fn find_by_ids(
        &self,
        ids: &[CommentId],
    ) -> Result<Vec<Comment>, CommentPersistenceError> {
        let guard = self.inner.read().await;
        Ok(pick(&guard.comments, ids, |comment| &comment.id))
    }

    async fn list_all(&self) -> Result<Vec<Comment>, CommentPersistenceError> {
        Ok(self.inner.read().await.comments.clone())
    }

    async fn approve(&self, id: &CommentId) -> Result<Option<Comment>, CommentPersistenceError> {
        let mut guard = self.inner.write().await;
        Ok(guard.comments.iter_mut().find(|c| c.id == *id).map(|comment| {
            comment.approved = true;
            comment.clone()
        }))
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn insert(&self, category: &Category) -> Result<(), CategoryPersistenceError> {
        self.inner.write().await.categories.push(category.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Category>, CategoryPersistenceError> {
        Ok(self.inner.read().await.categories.clone())
    }
}
