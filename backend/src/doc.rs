//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST handler, the request and response
//! schemas, and the bearer-token security scheme. Public routes opt out of
//! the default security requirement on their own path annotations.
//!
//! The generated document is served by Swagger UI in debug builds and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::domain::{Error, ErrorCode, Preferences, Role, Seo};
use crate::inbound::http::articles::{
    ArticleCommentResponse, ArticleRequest, ArticleResponse, ArticleViewResponse,
};
use crate::inbound::http::categories::{CategoryRequest, CategoryResponse};
use crate::inbound::http::comments::{CommentListingResponse, CommentRequest, CommentResponse};
use crate::inbound::http::schemas::{ArticleRef, MessageResponse, UserRef};
use crate::inbound::http::users::{
    CredentialsRequest, LoginResponse, PreferencesRequest, UserResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme in the generated document.
pub const BEARER_SCHEME: &str = "BearerToken";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("HS256 token issued by POST /api/users/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Newsroom API",
        description = "Articles, categories, comments and role-gated accounts for a news site."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::update_preferences,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::articles::list_articles,
        crate::inbound::http::articles::get_article,
        crate::inbound::http::articles::create_article,
        crate::inbound::http::articles::update_article,
        crate::inbound::http::articles::delete_article,
        crate::inbound::http::comments::create_comment,
        crate::inbound::http::comments::list_comments,
        crate::inbound::http::comments::approve_comment,
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::categories::create_category,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Role,
        Preferences,
        Seo,
        MessageResponse,
        UserRef,
        ArticleRef,
        CredentialsRequest,
        LoginResponse,
        PreferencesRequest,
        UserResponse,
        ArticleRequest,
        ArticleResponse,
        ArticleCommentResponse,
        ArticleViewResponse,
        CommentRequest,
        CommentResponse,
        CommentListingResponse,
        CategoryRequest,
        CategoryResponse,
    )),
    tags(
        (name = "users", description = "Registration, login and account administration"),
        (name = "articles", description = "Published articles"),
        (name = "comments", description = "Reader comments and moderation"),
        (name = "categories", description = "Article categories"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
