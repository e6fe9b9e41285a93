//! Demo dataset and the seeder that writes it through the repository ports.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use thiserror::Error;
use tracing::debug;

use crate::domain::ports::{
    ArticlePersistenceError, ArticleRepository, CategoryPersistenceError, CategoryRepository,
    CommentPersistenceError, CommentRepository, PasswordHashError, PasswordHasher,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Article, ArticleId, Category, CategoryId, Comment, Email, Preferences, Role, Seo, User,
    UserValidationError,
};
use crate::outbound::memory::MemoryStore;

const CATEGORIES: [(&str, &str); 5] = [
    ("Politics", "Political news and updates"),
    ("Business", "Business and economy news"),
    ("Technology", "Tech innovations and trends"),
    ("Entertainment", "Movies, music, and celebrities"),
    ("Sports", "Sports events and highlights"),
];

struct DemoUser {
    email: &'static str,
    password: &'static str,
    role: Role,
    categories: &'static [&'static str],
    notifications: bool,
}

const USERS: [DemoUser; 3] = [
    DemoUser {
        email: "admin@example.com",
        password: "admin123",
        role: Role::Admin,
        categories: &["Politics", "Business"],
        notifications: true,
    },
    DemoUser {
        email: "editor@example.com",
        password: "editor123",
        role: Role::Editor,
        categories: &["Technology"],
        notifications: true,
    },
    DemoUser {
        email: "user@example.com",
        password: "user123",
        role: Role::Registered,
        categories: &["Sports"],
        notifications: false,
    },
];

/// Errors raised while writing demo data.
#[derive(Debug, Error)]
pub enum DemoDataError {
    #[error("demo user store error: {0}")]
    Users(#[from] UserPersistenceError),
    #[error("demo article store error: {0}")]
    Articles(#[from] ArticlePersistenceError),
    #[error("demo comment store error: {0}")]
    Comments(#[from] CommentPersistenceError),
    #[error("demo category store error: {0}")]
    Categories(#[from] CategoryPersistenceError),
    #[error("demo password hashing failed: {0}")]
    PasswordHash(#[from] PasswordHashError),
    #[error("demo user failed validation: {0}")]
    InvalidUser(#[from] UserValidationError),
    #[error("demo comment references article {article} which was not stored")]
    MissingArticle { article: ArticleId },
}

/// Result of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoDataOutcome {
    /// Documents written per collection.
    Applied {
        categories: usize,
        users: usize,
        articles: usize,
        comments: usize,
    },
    /// The user collection was not empty; nothing was written.
    AlreadySeeded,
}

/// Repository ports the seeder writes through.
#[derive(Clone)]
pub struct DemoDataRepositories {
    pub users: Arc<dyn UserRepository>,
    pub articles: Arc<dyn ArticleRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub categories: Arc<dyn CategoryRepository>,
}

impl DemoDataRepositories {
    /// Use one in-memory store for every collection.
    pub fn from_store(store: Arc<MemoryStore>) -> Self {
        Self {
            users: store.clone(),
            articles: store.clone(),
            comments: store.clone(),
            categories: store,
        }
    }
}

/// Writes the demo dataset into empty stores.
pub struct DemoDataSeeder {
    repositories: DemoDataRepositories,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

impl DemoDataSeeder {
    pub fn new(
        repositories: DemoDataRepositories,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repositories,
            hasher,
            clock,
        }
    }

    /// Seed every collection unless a user already exists.
    ///
    /// # Errors
    ///
    /// Returns [`DemoDataError`] when hashing or any store write fails.
    /// Documents written before the failure stay in place.
    pub async fn seed(&self) -> Result<DemoDataOutcome, DemoDataError> {
        if !self.repositories.users.list().await?.is_empty() {
            return Ok(DemoDataOutcome::AlreadySeeded);
        }
        let now = self.clock.utc();

        for (name, description) in CATEGORIES {
            self.repositories
                .categories
                .insert(&Category {
                    id: CategoryId::random(),
                    name: name.to_owned(),
                    description: description.to_owned(),
                })
                .await?;
        }

        let mut users = Vec::with_capacity(USERS.len());
        for demo in &USERS {
            let user = self.demo_user(demo, now)?;
            self.repositories.users.insert(&user).await?;
            debug!(email = %user.email, role = %user.role, "demo user created");
            users.push(user);
        }

        let articles = demo_articles(now);
        for article in &articles {
            self.repositories.articles.insert(article).await?;
        }

        let comments = match (articles.as_slice(), users.as_slice()) {
            ([reform, ai], [_, editor, reader]) => {
                let mut praise = Comment::new(
                    reform.id,
                    reader.id,
                    "Great article! Looking forward to more updates.",
                    now,
                );
                praise.approved = true;
                let critique = Comment::new(
                    ai.id,
                    editor.id,
                    "Interesting insights on AI. Needs more details.",
                    now,
                );
                vec![praise, critique]
            }
            _ => Vec::new(),
        };
        for comment in &comments {
            self.repositories.comments.insert(comment).await?;
            let appended = self
                .repositories
                .articles
                .append_comment(&comment.article, &comment.id)
                .await?;
            if !appended {
                return Err(DemoDataError::MissingArticle {
                    article: comment.article,
                });
            }
        }

        Ok(DemoDataOutcome::Applied {
            categories: CATEGORIES.len(),
            users: users.len(),
            articles: articles.len(),
            comments: comments.len(),
        })
    }

    fn demo_user(&self, demo: &DemoUser, now: DateTime<Utc>) -> Result<User, DemoDataError> {
        let digest = self.hasher.hash(demo.password)?;
        let mut user = User::with_role(Email::new(demo.email)?, digest, demo.role, now);
        user.preferences = Preferences {
            categories: demo.categories.iter().map(|name| (*name).to_owned()).collect(),
            notifications: demo.notifications,
        };
        Ok(user)
    }
}

fn demo_articles(now: DateTime<Utc>) -> [Article; 2] {
    [
        Article {
            id: ArticleId::random(),
            title: "New Political Reform Announced".to_owned(),
            author: "John Doe".to_owned(),
            date: now,
            category: "Politics".to_owned(),
            tags: vec!["politics".to_owned(), "reform".to_owned()],
            content: "A major political reform was announced today by the government..."
                .to_owned(),
            featured_image: Some(
                "https://images.unsplash.com/photo-1682687221006-b7fd60cf9dd0?w=600".to_owned(),
            ),
            seo: Some(Seo {
                title: Some("Political Reform 2025".to_owned()),
                description: Some("Read about the latest political reform in 2025.".to_owned()),
                keywords: vec!["politics".to_owned(), "reform".to_owned(), "2025".to_owned()],
            }),
            comments: Vec::new(),
            created_at: now,
        },
        Article {
            id: ArticleId::random(),
            title: "Tech Breakthrough in AI".to_owned(),
            author: "Jane Smith".to_owned(),
            date: now,
            category: "Technology".to_owned(),
            tags: vec!["ai".to_owned(), "technology".to_owned()],
            content: "A new AI breakthrough has revolutionized the industry...".to_owned(),
            featured_image: Some(
                "https://plus.unsplash.com/premium_photo-1752658399836-07566560b88f?w=600"
                    .to_owned(),
            ),
            seo: Some(Seo {
                title: Some("AI Breakthrough 2025".to_owned()),
                description: Some("Latest AI innovations in 2025.".to_owned()),
                keywords: vec![
                    "ai".to_owned(),
                    "technology".to_owned(),
                    "innovation".to_owned(),
                ],
            }),
            comments: Vec::new(),
            created_at: now,
        },
    ]
}
