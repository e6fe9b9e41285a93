//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories here only translate between Diesel rows and domain types.
//! Connections come from a `bb8` pool over `diesel-async`; row structs and the
//! schema stay private to this module.
//!
//! # Example
//!
//! ```ignore
//! use newsroom::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/newsroom")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_article_repository;
mod diesel_category_repository;
mod diesel_comment_repository;
pub(crate) mod diesel_helpers;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_article_repository::DieselArticleRepository;
pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
