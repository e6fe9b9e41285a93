//! Comments API handlers.
//!
//! ```text
//! POST /api/comments               {"articleId":"..","content":"Nice piece"}
//! GET  /api/comments
//! PUT  /api/comments/{id}/approve
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    ApiResult, ArticleId, Comment, CommentId, CommentListing, Error, MEMBERS, authorize,
};
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::schemas::{ArticleRef, UserRef};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_body_id, parse_json_body, parse_path_id,
};

/// Body for `POST /api/comments`. The author is always the caller.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    pub article_id: Option<String>,
    #[schema(example = "Great article!")]
    pub content: Option<String>,
}

/// A stored comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub article: Uuid,
    pub user: Uuid,
    pub content: String,
    pub date: DateTime<Utc>,
    pub approved: bool,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: *comment.id.as_uuid(),
            article: *comment.article.as_uuid(),
            user: *comment.user.as_uuid(),
            content: comment.content,
            date: comment.date,
            approved: comment.approved,
        }
    }
}

/// A comment as listed for moderation. `user` and `article` are `null` when
/// the referenced record has been deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentListingResponse {
    pub id: Uuid,
    pub article: Option<ArticleRef>,
    pub user: Option<UserRef>,
    pub content: String,
    pub date: DateTime<Utc>,
    pub approved: bool,
}

impl From<CommentListing> for CommentListingResponse {
    fn from(listing: CommentListing) -> Self {
        let CommentListing {
            comment,
            author,
            article,
        } = listing;
        Self {
            id: *comment.id.as_uuid(),
            article: article.as_ref().map(ArticleRef::from),
            user: author.as_ref().map(UserRef::from),
            content: comment.content,
            date: comment.date,
            approved: comment.approved,
        }
    }
}

/// Comment on an article. Registered users, editors and admins.
#[utoipa::path(
    post,
    path = "/api/comments",
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 400, description = "Missing content or malformed article id", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Article not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["comments"],
    operation_id = "createComment"
)]
#[post("")]
pub async fn create_comment(
    state: web::Data<HttpState>,
    caller: Authenticated,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    authorize(caller.identity(), MEMBERS)?;
    let CommentRequest {
        article_id,
        content,
    } = parse_json_body(&body)?;
    let article: ArticleId = parse_body_id(article_id, FieldName::new("articleId"))?;
    let comment = state
        .comments
        .create(caller.identity(), &article, content)
        .await?;
    Ok(HttpResponse::Created().json(CommentResponse::from(comment)))
}

/// Every comment with author and article resolved. Admin or editor.
#[utoipa::path(
    get,
    path = "/api/comments",
    responses(
        (status = 200, description = "Comments", body = [CommentListingResponse]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["comments"],
    operation_id = "listComments"
)]
#[get("")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    caller: Authenticated,
) -> ApiResult<web::Json<Vec<CommentListingResponse>>> {
    let listings = state.comments.list_all(caller.identity()).await?;
    Ok(web::Json(listings.into_iter().map(Into::into).collect()))
}

/// Approve a comment. Admin or editor; approving twice is harmless.
#[utoipa::path(
    put,
    path = "/api/comments/{id}/approve",
    params(("id" = Uuid, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Approved comment", body = CommentResponse),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Comment not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["comments"],
    operation_id = "approveComment"
)]
#[put("/{id}/approve")]
pub async fn approve_comment(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<CommentResponse>> {
    let id: CommentId = parse_path_id(&path, || Error::not_found("Comment not found"))?;
    let comment = state.comments.approve(caller.identity(), &id).await?;
    Ok(web::Json(comment.into()))
}
