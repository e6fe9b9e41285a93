//! Articles API handlers.
//!
//! ```text
//! GET    /api/articles?category=Technology&search=ai&limit=5
//! GET    /api/articles/{id}
//! POST   /api/articles        {"title":"..","author":"..","category":"..","content":".."}
//! PUT    /api/articles/{id}   {"title":".."}
//! DELETE /api/articles/{id}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{
    ApiResult, Article, ArticleComment, ArticleId, ArticleInput, ArticleQuery, ArticleView,
    EDITORS, Error, Seo, authorize,
};
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::schemas::{MessageResponse, UserRef};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_json_body, parse_path_id};

fn article_not_found() -> Error {
    Error::not_found("Article not found")
}

/// Query string for `GET /api/articles`.
///
/// `limit` is kept as text: anything that is not a positive integer falls
/// back to the default rather than failing the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ArticleListParams {
    /// Exact, case-sensitive category name.
    pub category: Option<String>,
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
    /// Maximum number of articles; defaults to 10.
    pub limit: Option<String>,
}

impl ArticleListParams {
    /// Read the filters from a raw query string. A repeated key keeps its
    /// first value; unknown keys are ignored.
    pub fn from_query(raw: &str) -> Result<Self, Error> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw)
            .map_err(|err| Error::invalid_request(format!("Invalid query string: {err}")))?;
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "category" => &mut params.category,
                "search" => &mut params.search,
                "limit" => &mut params.limit,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        Ok(params)
    }
}

impl From<&ArticleListParams> for ArticleQuery {
    fn from(params: &ArticleListParams) -> Self {
        ArticleQuery::from_raw(
            params.category.as_deref(),
            params.search.as_deref(),
            params.limit.as_deref(),
        )
    }
}

/// Article body for create and update. Every field is optional so updates can
/// send a subset; create validates the required ones.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRequest {
    #[schema(example = "Tech Breakthrough in AI")]
    pub title: Option<String>,
    #[schema(example = "Jane Smith")]
    pub author: Option<String>,
    #[schema(example = "Technology")]
    pub category: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured_image: Option<String>,
    pub seo: Option<Seo>,
    pub date: Option<DateTime<Utc>>,
}

impl From<ArticleRequest> for ArticleInput {
    fn from(request: ArticleRequest) -> Self {
        Self {
            title: request.title,
            author: request.author,
            category: request.category,
            content: request.content,
            tags: request.tags,
            featured_image: request.featured_image,
            seo: request.seo,
            date: request.date,
        }
    }
}

/// Article as stored, with comment back-references as ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub date: DateTime<Utc>,
    pub category: String,
    pub tags: Vec<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<Seo>,
    pub comments: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        Self {
            id: *article.id.as_uuid(),
            title: article.title,
            author: article.author,
            date: article.date,
            category: article.category,
            tags: article.tags,
            content: article.content,
            featured_image: article.featured_image,
            seo: article.seo,
            comments: article.comments.iter().map(|id| *id.as_uuid()).collect(),
            created_at: article.created_at,
        }
    }
}

/// A comment as shown under an article. `user.email` is present on the
/// detail endpoint only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleCommentResponse {
    pub id: Uuid,
    pub article: Uuid,
    pub user: UserRef,
    pub content: String,
    pub date: DateTime<Utc>,
    pub approved: bool,
}

impl From<ArticleComment> for ArticleCommentResponse {
    fn from(entry: ArticleComment) -> Self {
        let ArticleComment { comment, author } = entry;
        let user = author.as_ref().map_or_else(
            || UserRef {
                id: *comment.user.as_uuid(),
                email: None,
            },
            UserRef::from,
        );
        Self {
            id: *comment.id.as_uuid(),
            article: *comment.article.as_uuid(),
            user,
            content: comment.content,
            date: comment.date,
            approved: comment.approved,
        }
    }
}

/// Article with its comments resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleViewResponse {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub date: DateTime<Utc>,
    pub category: String,
    pub tags: Vec<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<Seo>,
    pub comments: Vec<ArticleCommentResponse>,
    pub created_at: DateTime<Utc>,
}

impl From<ArticleView> for ArticleViewResponse {
    fn from(view: ArticleView) -> Self {
        let ArticleView { article, comments } = view;
        Self {
            id: *article.id.as_uuid(),
            title: article.title,
            author: article.author,
            date: article.date,
            category: article.category,
            tags: article.tags,
            content: article.content,
            featured_image: article.featured_image,
            seo: article.seo,
            comments: comments.into_iter().map(Into::into).collect(),
            created_at: article.created_at,
        }
    }
}

/// Newest articles first, optionally filtered.
#[utoipa::path(
    get,
    path = "/api/articles",
    params(ArticleListParams),
    responses(
        (status = 200, description = "Articles", body = [ArticleViewResponse]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["articles"],
    operation_id = "listArticles",
    security([])
)]
#[get("")]
pub async fn list_articles(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<Vec<ArticleViewResponse>>> {
    let params = ArticleListParams::from_query(req.query_string())?;
    let query = ArticleQuery::from(&params);
    let views = state.articles.list(&query).await?;
    Ok(web::Json(views.into_iter().map(Into::into).collect()))
}

/// One article with comments and commenter emails.
#[utoipa::path(
    get,
    path = "/api/articles/{id}",
    params(("id" = Uuid, Path, description = "Article id")),
    responses(
        (status = 200, description = "Article", body = ArticleViewResponse),
        (status = 404, description = "Article not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["articles"],
    operation_id = "getArticle",
    security([])
)]
#[get("/{id}")]
pub async fn get_article(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ArticleViewResponse>> {
    let id: ArticleId = parse_path_id(&path, article_not_found)?;
    let view = state.articles.get(&id).await?;
    Ok(web::Json(view.into()))
}

/// Publish an article. Admin or editor.
#[utoipa::path(
    post,
    path = "/api/articles",
    request_body = ArticleRequest,
    responses(
        (status = 201, description = "Article created", body = ArticleResponse),
        (status = 400, description = "Missing required field", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["articles"],
    operation_id = "createArticle"
)]
#[post("")]
pub async fn create_article(
    state: web::Data<HttpState>,
    caller: Authenticated,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    authorize(caller.identity(), EDITORS)?;
    let payload: ArticleRequest = parse_json_body(&body)?;
    let article = state
        .articles
        .create(caller.identity(), payload.into())
        .await?;
    Ok(HttpResponse::Created().json(ArticleResponse::from(article)))
}

/// Replace the fields present in the body. Admin or editor.
#[utoipa::path(
    put,
    path = "/api/articles/{id}",
    params(("id" = Uuid, Path, description = "Article id")),
    request_body = ArticleRequest,
    responses(
        (status = 200, description = "Updated article", body = ArticleResponse),
        (status = 400, description = "Blank field", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Article not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["articles"],
    operation_id = "updateArticle"
)]
#[put("/{id}")]
pub async fn update_article(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<web::Json<ArticleResponse>> {
    authorize(caller.identity(), EDITORS)?;
    let id: ArticleId = parse_path_id(&path, article_not_found)?;
    let payload: ArticleRequest = parse_json_body(&body)?;
    let article = state
        .articles
        .update(caller.identity(), &id, payload.into())
        .await?;
    Ok(web::Json(article.into()))
}

/// Delete an article. Admin only.
#[utoipa::path(
    delete,
    path = "/api/articles/{id}",
    params(("id" = Uuid, Path, description = "Article id")),
    responses(
        (status = 200, description = "Article deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Malformed id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["articles"],
    operation_id = "deleteArticle"
)]
#[delete("/{id}")]
pub async fn delete_article(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id: ArticleId = parse_path_id(&path, article_not_found)?;
    state.articles.delete(caller.identity(), &id).await?;
    Ok(web::Json(MessageResponse::new("Article deleted")))
}

#[cfg(test)]
#[path = "articles_tests.rs"]
mod tests;
