//! Domain primitives, aggregates and services.
//!
//! Purpose: define the newsroom's entities and the use-cases over them without
//! depending on HTTP or storage. Services implement the driving ports in
//! [`ports`] and talk to storage only through driven ports.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Role, Identity, authorize: the role gate every privileged operation runs.
//! - User, Article, Comment, Category: the four collections.
//! - *ServiceImpl: use-case implementations wired by the server.

pub mod article;
mod article_service;
pub mod auth;
pub mod category;
mod category_service;
pub mod comment;
mod comment_service;
pub mod error;
pub mod ids;
pub mod ports;
mod trace_id;
pub mod user;
mod user_service;

pub use self::article::{
    Article, ArticleInput, ArticlePatch, ArticleQuery, ArticleSummary, ArticleView,
    DEFAULT_ARTICLE_LIMIT, Seo,
};
pub use self::article_service::ArticleServiceImpl;
pub use self::auth::{
    ADMINS, Credentials, CredentialsValidationError, EDITORS, Identity, MEMBERS, Role,
    UnknownRole, authorize,
};
pub use self::category::{Category, CategoryInput};
pub use self::category_service::CategoryServiceImpl;
pub use self::comment::{
    ArticleComment, Comment, CommentListing, CommentVisibility, UnknownCommentVisibility,
};
pub use self::comment_service::CommentServiceImpl;
pub use self::error::{Error, ErrorCode};
pub use self::ids::{ArticleId, CategoryId, CommentId, InvalidId, UserId};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Email, PasswordDigest, Preferences, User, UserSummary, UserValidationError};
pub use self::user_service::UserServiceImpl;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use newsroom::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
