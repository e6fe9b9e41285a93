//! Typed calls against every API route.

use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;
use uuid::Uuid;

use crate::error::ClientError;
use crate::models::{
    Article, ArticleDetail, ArticleDraft, ArticleFilter, Category, CategoryDraft, Comment,
    CommentListing, LoginResponse, MessageResponse, Preferences, User,
};
use crate::session::SessionStore;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Client for the newsroom API.
///
/// Every call attaches the stored bearer token when one exists; the server
/// decides whether the route needs it. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Build a client over `transport`, reading tokens from `session`.
    pub fn new(transport: Arc<dyn Transport>, session: Arc<dyn SessionStore>) -> Self {
        Self { transport, session }
    }

    /// Whether a token is stored. Says nothing about its validity.
    pub fn has_token(&self) -> Result<bool, ClientError> {
        Ok(self.session.token()?.is_some())
    }

    async fn call<T: DeserializeOwned>(&self, mut request: ApiRequest) -> Result<T, ClientError> {
        request.bearer = self.session.token()?;
        let method = request.method;
        let path = request.path.clone();
        let response = self.transport.send(request).await?;
        debug!(%method, %path, status = response.status, "api call completed");
        decode(response)
    }

    /// Create an account. The server assigns the `registered` role; no token
    /// is issued.
    pub async fn register(&self, email: &str, password: &str) -> Result<User, ClientError> {
        let mut request = ApiRequest::new(Method::Post, "/api/users/register");
        request.body = Some(json!({ "email": email, "password": password }));
        self.call(request).await
    }

    /// Log in and persist the issued token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let mut request = ApiRequest::new(Method::Post, "/api/users/login");
        request.body = Some(json!({ "email": email, "password": password }));
        let issued: LoginResponse = self.call(request).await?;
        self.session.store(&issued.token)?;
        Ok(issued)
    }

    /// Forget the stored token.
    pub fn sign_out(&self) -> Result<(), ClientError> {
        self.session.clear()?;
        Ok(())
    }

    /// The account behind the stored token.
    pub async fn current_user(&self) -> Result<User, ClientError> {
        self.call(ApiRequest::new(Method::Get, "/api/users/me"))
            .await
    }

    /// Replace the caller's preferences wholesale.
    pub async fn update_preferences(&self, preferences: &Preferences) -> Result<User, ClientError> {
        let mut request = ApiRequest::new(Method::Put, "/api/users/preferences");
        request.body = Some(json!({ "preferences": preferences }));
        self.call(request).await
    }

    /// Every account. Admin only; an empty store answers 404.
    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.call(ApiRequest::new(Method::Get, "/api/users/all"))
            .await
    }

    /// Remove an account. Admin only.
    pub async fn delete_user(&self, id: Uuid) -> Result<MessageResponse, ClientError> {
        self.call(ApiRequest::new(Method::Delete, format!("/api/users/{id}")))
            .await
    }

    /// Articles newest first, narrowed by `filter`.
    pub async fn list_articles(
        &self,
        filter: &ArticleFilter,
    ) -> Result<Vec<ArticleDetail>, ClientError> {
        let mut request = ApiRequest::new(Method::Get, "/api/articles");
        request.query = filter.query_pairs();
        self.call(request).await
    }

    /// One article with its comments and commenter emails.
    pub async fn get_article(&self, id: Uuid) -> Result<ArticleDetail, ClientError> {
        self.call(ApiRequest::new(Method::Get, format!("/api/articles/{id}")))
            .await
    }

    /// Publish `draft`. Editors and admins.
    pub async fn create_article(&self, draft: &ArticleDraft) -> Result<Article, ClientError> {
        let mut request = ApiRequest::new(Method::Post, "/api/articles");
        request.body = Some(to_body(draft)?);
        self.call(request).await
    }

    /// Send only the fields present in `changes`.
    pub async fn update_article(&self, id: Uuid, changes: Value) -> Result<Article, ClientError> {
        let mut request = ApiRequest::new(Method::Put, format!("/api/articles/{id}"));
        request.body = Some(changes);
        self.call(request).await
    }

    /// Remove an article. Admin only.
    pub async fn delete_article(&self, id: Uuid) -> Result<MessageResponse, ClientError> {
        self.call(ApiRequest::new(Method::Delete, format!("/api/articles/{id}")))
            .await
    }

    /// Every category, in creation order.
    pub async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        self.call(ApiRequest::new(Method::Get, "/api/categories"))
            .await
    }

    /// Add a category. Admin only.
    pub async fn create_category(&self, draft: &CategoryDraft) -> Result<Category, ClientError> {
        let mut request = ApiRequest::new(Method::Post, "/api/categories");
        request.body = Some(to_body(draft)?);
        self.call(request).await
    }

    /// Comment on `article` as the signed-in user.
    pub async fn create_comment(&self, article: Uuid, content: &str) -> Result<Comment, ClientError> {
        let mut request = ApiRequest::new(Method::Post, "/api/comments");
        request.body = Some(json!({ "articleId": article, "content": content }));
        self.call(request).await
    }

    /// Every comment with author and article resolved. Editors and admins.
    pub async fn list_comments(&self) -> Result<Vec<CommentListing>, ClientError> {
        self.call(ApiRequest::new(Method::Get, "/api/comments"))
            .await
    }

    /// Mark a comment approved. Editors and admins.
    pub async fn approve_comment(&self, id: Uuid) -> Result<Comment, ClientError> {
        self.call(ApiRequest::new(
            Method::Put,
            format!("/api/comments/{id}/approve"),
        ))
        .await
    }
}

fn to_body<T: serde::Serialize>(value: &T) -> Result<Value, ClientError> {
    serde_json::to_value(value).map_err(|error| ClientError::Decode {
        message: error.to_string(),
    })
}

fn decode<T: DeserializeOwned>(response: ApiResponse) -> Result<T, ClientError> {
    if !response.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&response.body)
            .ok()
            .and_then(|body| body.message);
        return Err(ClientError::Status {
            status: response.status,
            message,
        });
    }
    serde_json::from_slice(&response.body).map_err(|error| ClientError::Decode {
        message: error.to_string(),
    })
}
