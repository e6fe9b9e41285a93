//! Wire shapes exchanged with the newsroom API.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role. Governs which sections a view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Signed in but not yet granted reader rights.
    Guest,
    /// A reader who may comment and keep preferences.
    Registered,
    /// Publishes articles and moderates comments.
    Editor,
    /// Full access, including accounts and categories.
    Admin,
}

impl Role {
    /// Editors and admins.
    pub fn is_staff(self) -> bool {
        matches!(self, Self::Editor | Self::Admin)
    }

    /// Admins only.
    pub fn is_admin(self) -> bool {
        self == Self::Admin
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Guest => "guest",
            Self::Registered => "registered",
            Self::Editor => "editor",
            Self::Admin => "admin",
        };
        f.write_str(name)
    }
}

/// Reader preferences; replaced wholesale on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Categories the reader follows.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Whether to receive notifications. Defaults to on.
    #[serde(default)]
    pub notifications: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            notifications: true,
        }
    }
}

/// A user profile. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server-assigned identifier.
    pub id: Uuid,
    /// Sign-in email, unique across accounts.
    pub email: String,
    /// Access level.
    pub role: Role,
    /// Reader preferences.
    #[serde(default)]
    pub preferences: Preferences,
    /// Bookmarked article ids.
    #[serde(default)]
    pub bookmarks: Vec<Uuid>,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

/// Token issued by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for later calls.
    pub token: String,
    /// When the token stops verifying.
    pub expires_at: DateTime<Utc>,
}

/// Search-engine metadata attached to an article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    /// Page title override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Meta description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Meta keywords.
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Reference to a user inside another document. `email` is only resolved on
/// some endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    /// Referenced user.
    pub id: Uuid,
    /// Email, when the endpoint resolves it.
    #[serde(default)]
    pub email: Option<String>,
}

/// Reference to an article inside another document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRef {
    /// Referenced article.
    pub id: Uuid,
    /// Its title at read time.
    pub title: String,
}

/// Comment as embedded in an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleComment {
    /// Comment identifier.
    pub id: Uuid,
    /// Article the comment belongs to.
    pub article: Uuid,
    /// Author.
    pub user: UserRef,
    /// Comment text.
    pub content: String,
    /// When it was posted.
    pub date: DateTime<Utc>,
    /// Whether moderation has approved it.
    pub approved: bool,
}

/// Article with comments inlined, as returned by list and detail reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDetail {
    /// Article identifier.
    pub id: Uuid,
    /// Headline.
    pub title: String,
    /// Byline.
    pub author: String,
    /// Publication date.
    pub date: DateTime<Utc>,
    /// Category name.
    pub category: String,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Body text.
    pub content: String,
    /// Hero image URL.
    #[serde(default)]
    pub featured_image: Option<String>,
    /// Search-engine metadata.
    #[serde(default)]
    pub seo: Option<Seo>,
    /// Comments the server chose to show.
    #[serde(default)]
    pub comments: Vec<ArticleComment>,
    /// When the article was stored.
    pub created_at: DateTime<Utc>,
}

/// Article as stored, returned by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Article identifier.
    pub id: Uuid,
    /// Headline.
    pub title: String,
    /// Byline.
    pub author: String,
    /// Publication date.
    pub date: DateTime<Utc>,
    /// Category name.
    pub category: String,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Body text.
    pub content: String,
    /// Hero image URL.
    #[serde(default)]
    pub featured_image: Option<String>,
    /// Search-engine metadata.
    #[serde(default)]
    pub seo: Option<Seo>,
    /// Comment ids, oldest first.
    #[serde(default)]
    pub comments: Vec<Uuid>,
    /// When the article was stored.
    pub created_at: DateTime<Utc>,
}

/// Comment as returned by creation and approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment identifier.
    pub id: Uuid,
    /// Article the comment belongs to.
    pub article: Uuid,
    /// Author id.
    pub user: Uuid,
    /// Comment text.
    pub content: String,
    /// When it was posted.
    pub date: DateTime<Utc>,
    /// Whether moderation has approved it.
    pub approved: bool,
}

impl From<Comment> for ArticleComment {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            article: comment.article,
            user: UserRef {
                id: comment.user,
                email: None,
            },
            content: comment.content,
            date: comment.date,
            approved: comment.approved,
        }
    }
}

/// Comment in the moderation listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentListing {
    /// Comment identifier.
    pub id: Uuid,
    /// The article, or `None` if it was deleted.
    pub article: Option<ArticleRef>,
    /// The author, or `None` if the account was deleted.
    pub user: Option<UserRef>,
    /// Comment text.
    pub content: String,
    /// When it was posted.
    pub date: DateTime<Utc>,
    /// Whether moderation has approved it.
    pub approved: bool,
}

/// A named section of the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category identifier.
    pub id: Uuid,
    /// Display name, matched exactly by article filters.
    pub name: String,
    /// Optional blurb.
    #[serde(default)]
    pub description: String,
}

/// Plain acknowledgement body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

/// Fields for a new article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDraft {
    /// Headline. Required.
    pub title: String,
    /// Byline. Required.
    pub author: String,
    /// Category name. Required.
    pub category: String,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Body text. Required.
    pub content: String,
    /// Hero image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    /// Search-engine metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo: Option<Seo>,
}

/// Fields for a new category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryDraft {
    /// Display name. Required.
    pub name: String,
    /// Optional blurb.
    pub description: String,
}

/// Server-side filters for the article feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    /// Exact, case-sensitive category name.
    pub category: Option<String>,
    /// Case-insensitive title substring.
    pub search: Option<String>,
    /// Maximum number of articles; the server defaults to 10.
    pub limit: Option<u32>,
}

impl ArticleFilter {
    /// Filter on one category.
    pub fn category(name: impl Into<String>) -> Self {
        Self {
            category: Some(name.into()),
            ..Self::default()
        }
    }

    /// Filter on a title substring.
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: Some(text.into()),
            ..Self::default()
        }
    }

    pub(crate) fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = &self.category {
            pairs.push(("category".to_owned(), category.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search".to_owned(), search.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_owned(), limit.to_string()));
        }
        pairs
    }
}
