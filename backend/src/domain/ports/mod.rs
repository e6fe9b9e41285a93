//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (repositories, password hashing, tokens) are implemented by
//! outbound adapters. Driving ports (the `*Service` traits) are what inbound
//! adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod article_repository;
mod article_service;
mod category_repository;
mod category_service;
mod comment_repository;
mod comment_service;
mod password_hasher;
mod token_service;
mod user_repository;
mod user_service;

#[cfg(test)]
pub use article_repository::MockArticleRepository;
pub use article_repository::{ArticlePersistenceError, ArticleRepository};
#[cfg(test)]
pub use article_service::MockArticleService;
pub use article_service::ArticleService;
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::{CategoryPersistenceError, CategoryRepository};
#[cfg(test)]
pub use category_service::MockCategoryService;
pub use category_service::CategoryService;
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{CommentPersistenceError, CommentRepository};
#[cfg(test)]
pub use comment_service::MockCommentService;
pub use comment_service::CommentService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{IssuedToken, TokenError, TokenService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use user_service::MockUserService;
pub use user_service::UserService;
