//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ArticleService, CategoryService, CommentService, TokenService, UserService,
};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use newsroom::domain::{
///     ArticleServiceImpl, CategoryServiceImpl, CommentServiceImpl, CommentVisibility,
///     UserServiceImpl,
/// };
/// use newsroom::inbound::http::state::HttpState;
/// use newsroom::outbound::memory::MemoryStore;
/// use newsroom::outbound::security::{Argon2PasswordHasher, JwtTokenService};
///
/// let store = Arc::new(MemoryStore::new());
/// let clock = Arc::new(DefaultClock);
/// let tokens = Arc::new(JwtTokenService::new(&[7; 32], clock.clone()));
/// let state = HttpState {
///     users: Arc::new(UserServiceImpl::new(
///         store.clone(),
///         Arc::new(Argon2PasswordHasher::default()),
///         tokens.clone(),
///         clock.clone(),
///     )),
///     articles: Arc::new(ArticleServiceImpl::new(
///         store.clone(),
///         store.clone(),
///         store.clone(),
///         CommentVisibility::All,
///         clock.clone(),
///     )),
///     comments: Arc::new(CommentServiceImpl::new(
///         store.clone(),
///         store.clone(),
///         store.clone(),
///         clock,
///     )),
///     categories: Arc::new(CategoryServiceImpl::new(store)),
///     tokens,
/// };
/// let _users = state.users.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserService>,
    pub articles: Arc<dyn ArticleService>,
    pub comments: Arc<dyn CommentService>,
    pub categories: Arc<dyn CategoryService>,
    /// Verifies bearer tokens for the [`Authenticated`](super::auth::Authenticated)
    /// extractor.
    pub tokens: Arc<dyn TokenService>,
}
