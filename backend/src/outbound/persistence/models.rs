//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{articles, categories, comments, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub preferences: serde_json::Value,
    pub bookmarks: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
    pub preferences: serde_json::Value,
    pub bookmarks: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Article models
// ---------------------------------------------------------------------------

/// Row struct for reading from the articles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = articles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ArticleRow {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub published_at: DateTime<Utc>,
    pub category: String,
    pub tags: Vec<String>,
    pub content: String,
    pub featured_image: Option<String>,
    pub seo: Option<serde_json::Value>,
    pub comment_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new article records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = articles)]
pub(crate) struct NewArticleRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub author: &'a str,
    pub published_at: DateTime<Utc>,
    pub category: &'a str,
    pub tags: &'a [String],
    pub content: &'a str,
    pub featured_image: Option<&'a str>,
    pub seo: Option<serde_json::Value>,
    pub comment_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Changeset for partial article updates. `None` fields are left untouched.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = articles)]
pub(crate) struct ArticleChangeset<'a> {
    pub title: Option<&'a str>,
    pub author: Option<&'a str>,
    pub published_at: Option<DateTime<Utc>>,
    pub category: Option<&'a str>,
    pub tags: Option<&'a [String]>,
    pub content: Option<&'a str>,
    pub featured_image: Option<&'a str>,
    pub seo: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Comment models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: Uuid,
    pub article_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub posted_at: DateTime<Utc>,
    pub approved: bool,
}

// ---------------------------------------------------------------------------
// Category models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = categories)]
pub(crate) struct NewCategoryRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: &'a str,
}
