//! Reader comments and moderation.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ArticleId, ArticleSummary, CommentId, UserId, UserSummary};

/// A comment left on an article. Starts unapproved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub article: ArticleId,
    pub user: UserId,
    pub content: String,
    pub date: DateTime<Utc>,
    pub approved: bool,
}

impl Comment {
    /// A new, unapproved comment by `user` on `article`.
    pub fn new(
        article: ArticleId,
        user: UserId,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CommentId::random(),
            article,
            user,
            content: content.into(),
            date: now,
            approved: false,
        }
    }
}

/// Which comments the public article read path returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CommentVisibility {
    /// Every attached comment, each carrying its `approved` flag.
    #[default]
    All,
    /// Only comments a moderator has approved.
    Approved,
}

impl CommentVisibility {
    /// Whether `comment` is shown on public reads.
    pub fn shows(self, comment: &Comment) -> bool {
        match self {
            Self::All => true,
            Self::Approved => comment.approved,
        }
    }
}

/// Raised when a visibility setting is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("comment visibility must be `all` or `approved`, got `{0}`")]
pub struct UnknownCommentVisibility(pub String);

impl FromStr for CommentVisibility {
    type Err = UnknownCommentVisibility;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "approved" => Ok(Self::Approved),
            _ => Err(UnknownCommentVisibility(s.to_owned())),
        }
    }
}

/// A comment with its author resolved, as shown under an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleComment {
    pub comment: Comment,
    /// `None` when the author account has since been deleted or when the
    /// read path does not resolve authors.
    pub author: Option<UserSummary>,
}

/// A comment with author and article resolved, as shown to moderators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentListing {
    pub comment: Comment,
    pub author: Option<UserSummary>,
    pub article: Option<ArticleSummary>,
}
