//! Articles, their write payloads and the public list query.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::{ArticleComment, ArticleId, CommentId, Error};

/// Default number of articles returned by a list query.
pub const DEFAULT_ARTICLE_LIMIT: usize = 10;

/// Search-engine metadata attached to an article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// A published article.
///
/// `comments` is a back-reference list: it grows whenever a comment is
/// created for this article and is never pruned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub author: String,
    pub date: DateTime<Utc>,
    pub category: String,
    pub tags: Vec<String>,
    pub content: String,
    pub featured_image: Option<String>,
    pub seo: Option<Seo>,
    pub comments: Vec<CommentId>,
    pub created_at: DateTime<Utc>,
}

/// Unvalidated article fields as submitted by a client.
///
/// Every field is optional so that role checks run before shape checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleInput {
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured_image: Option<String>,
    pub seo: Option<Seo>,
    pub date: Option<DateTime<Utc>>,
}

fn missing_field(field: &'static str) -> Error {
    Error::invalid_request(format!("{field} is required")).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

fn required(value: Option<String>, field: &'static str) -> Result<String, Error> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(missing_field(field)),
    }
}

fn non_blank_if_present(value: Option<String>, field: &'static str) -> Result<Option<String>, Error> {
    match value {
        Some(text) if text.trim().is_empty() => Err(missing_field(field)),
        other => Ok(other),
    }
}

impl ArticleInput {
    /// Validate the fields required for creation and build a new article.
    pub fn into_article(self, now: DateTime<Utc>) -> Result<Article, Error> {
        let title = required(self.title, "title")?;
        let author = required(self.author, "author")?;
        let category = required(self.category, "category")?;
        let content = required(self.content, "content")?;
        Ok(Article {
            id: ArticleId::random(),
            title,
            author,
            date: self.date.unwrap_or(now),
            category,
            tags: self.tags.unwrap_or_default(),
            content,
            featured_image: self.featured_image,
            seo: self.seo,
            comments: Vec::new(),
            created_at: now,
        })
    }

    /// Validate the fields present for an update.
    ///
    /// Absent fields are left untouched; required fields that are present
    /// must not be blank.
    pub fn into_patch(self) -> Result<ArticlePatch, Error> {
        Ok(ArticlePatch {
            title: non_blank_if_present(self.title, "title")?,
            author: non_blank_if_present(self.author, "author")?,
            category: non_blank_if_present(self.category, "category")?,
            content: non_blank_if_present(self.content, "content")?,
            tags: self.tags,
            featured_image: self.featured_image,
            seo: self.seo,
            date: self.date,
        })
    }
}

/// Field replacements applied by an article update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticlePatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured_image: Option<String>,
    pub seo: Option<Seo>,
    pub date: Option<DateTime<Utc>>,
}

impl ArticlePatch {
    /// True when the patch replaces nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the replacements to an in-memory article.
    pub fn apply_to(&self, article: &mut Article) {
        let patch = self.clone();
        if let Some(title) = patch.title {
            article.title = title;
        }
        if let Some(author) = patch.author {
            article.author = author;
        }
        if let Some(category) = patch.category {
            article.category = category;
        }
        if let Some(content) = patch.content {
            article.content = content;
        }
        if let Some(tags) = patch.tags {
            article.tags = tags;
        }
        if let Some(image) = patch.featured_image {
            article.featured_image = Some(image);
        }
        if let Some(seo) = patch.seo {
            article.seo = Some(seo);
        }
        if let Some(date) = patch.date {
            article.date = date;
        }
    }
}

/// Filters for the public article list.
///
/// `category` matches exactly and case-sensitively; `search` is a
/// case-insensitive substring match against the title only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub limit: usize,
}

impl Default for ArticleQuery {
    fn default() -> Self {
        Self {
            category: None,
            search: None,
            limit: DEFAULT_ARTICLE_LIMIT,
        }
    }
}

impl ArticleQuery {
    /// Build a query from raw query-string values.
    ///
    /// Empty filters are ignored. A limit that is missing, unparsable or not
    /// positive falls back to [`DEFAULT_ARTICLE_LIMIT`].
    ///
    /// # Examples
    /// ```
    /// use newsroom::domain::ArticleQuery;
    ///
    /// let query = ArticleQuery::from_raw(Some("Technology"), Some(""), Some("abc"));
    /// assert_eq!(query.category.as_deref(), Some("Technology"));
    /// assert_eq!(query.search, None);
    /// assert_eq!(query.limit, 10);
    /// ```
    pub fn from_raw(category: Option<&str>, search: Option<&str>, limit: Option<&str>) -> Self {
        let non_empty = |value: Option<&str>| value.filter(|v| !v.is_empty()).map(str::to_owned);
        let limit = limit
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(DEFAULT_ARTICLE_LIMIT);
        Self {
            category: non_empty(category),
            search: non_empty(search),
            limit,
        }
    }

    /// Whether `article` passes the category and search filters.
    pub fn matches(&self, article: &Article) -> bool {
        let category_ok = self
            .category
            .as_ref()
            .is_none_or(|category| &article.category == category);
        let search_ok = self.search.as_ref().is_none_or(|needle| {
            article
                .title
                .to_lowercase()
                .contains(&needle.to_lowercase())
        });
        category_ok && search_ok
    }
}

/// An article with its comments resolved for the public read path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleView {
    pub article: Article,
    pub comments: Vec<ArticleComment>,
}

/// Public projection of an article used when resolving references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSummary {
    pub id: ArticleId,
    pub title: String,
}

impl From<&Article> for ArticleSummary {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id,
            title: article.title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::{fixture, rstest};

    fn complete() -> ArticleInput {
        ArticleInput {
            title: Some("Tech Breakthrough in AI".to_owned()),
            author: Some("Jane Smith".to_owned()),
            category: Some("Technology".to_owned()),
            content: Some("Scientists have developed...".to_owned()),
            tags: Some(vec!["AI".to_owned()]),
            ..ArticleInput::default()
        }
    }

    #[fixture]
    fn complete_input() -> ArticleInput {
        complete()
    }

    #[rstest]
    fn into_article_defaults_date_and_empty_comments(complete_input: ArticleInput) {
        let now = Utc::now();
        let article = complete_input.into_article(now).expect("valid input");
        assert_eq!(article.date, now);
        assert_eq!(article.created_at, now);
        assert!(article.comments.is_empty());
        assert_eq!(article.tags, vec!["AI".to_owned()]);
    }

    #[rstest]
    #[case::title(ArticleInput { title: None, ..complete() }, "title")]
    #[case::author(ArticleInput { author: Some("  ".to_owned()), ..complete() }, "author")]
    #[case::category(ArticleInput { category: None, ..complete() }, "category")]
    #[case::content(ArticleInput { content: Some(String::new()), ..complete() }, "content")]
    fn into_article_requires_fields(#[case] input: ArticleInput, #[case] field: &str) {
        let err = input.into_article(Utc::now()).expect_err("missing field");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details().and_then(|d| d.get("field")), Some(&json!(field)));
    }

    #[rstest]
    fn patch_rejects_blank_title() {
        let input = ArticleInput {
            title: Some(" ".to_owned()),
            ..ArticleInput::default()
        };
        assert!(input.into_patch().is_err());
    }

    #[rstest]
    fn patch_applies_only_present_fields(complete_input: ArticleInput) {
        let mut article = complete_input.into_article(Utc::now()).expect("article");
        let patch = ArticleInput {
            title: Some("Updated".to_owned()),
            ..ArticleInput::default()
        }
        .into_patch()
        .expect("patch");
        patch.apply_to(&mut article);
        assert_eq!(article.title, "Updated");
        assert_eq!(article.author, "Jane Smith");
        assert!(!patch.is_empty());
        assert!(ArticlePatch::default().is_empty());
    }

    #[rstest]
    #[case(None, DEFAULT_ARTICLE_LIMIT)]
    #[case(Some("3"), 3)]
    #[case(Some("0"), DEFAULT_ARTICLE_LIMIT)]
    #[case(Some("-5"), DEFAULT_ARTICLE_LIMIT)]
    #[case(Some("ten"), DEFAULT_ARTICLE_LIMIT)]
    fn query_limit_falls_back_to_default(#[case] raw: Option<&str>, #[case] expected: usize) {
        assert_eq!(ArticleQuery::from_raw(None, None, raw).limit, expected);
    }

    #[rstest]
    #[case(Some("Technology"), None, true)]
    #[case(Some("technology"), None, false)]
    #[case(None, Some("ai"), true)]
    #[case(None, Some("BREAKTHROUGH"), true)]
    #[case(None, Some("content"), false)]
    #[case(Some("Politics"), Some("ai"), false)]
    fn query_matches_category_exactly_and_title_loosely(
        complete_input: ArticleInput,
        #[case] category: Option<&str>,
        #[case] search: Option<&str>,
        #[case] expected: bool,
    ) {
        let article = complete_input.into_article(Utc::now()).expect("article");
        let query = ArticleQuery::from_raw(category, search, None);
        assert_eq!(query.matches(&article), expected);
    }
}
