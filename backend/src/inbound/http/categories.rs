//! Categories API handlers.
//!
//! ```text
//! GET  /api/categories
//! POST /api/categories  {"name":"Science","description":"Research news"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{ApiResult, Category, CategoryInput, Error};
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::state::HttpState;

/// Body for `POST /api/categories`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    #[schema(example = "Science")]
    pub name: Option<String>,
    pub description: Option<String>,
}

impl From<CategoryRequest> for CategoryInput {
    fn from(request: CategoryRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: Uuid,
    #[schema(example = "Technology")]
    pub name: String,
    pub description: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: *category.id.as_uuid(),
            name: category.name,
            description: category.description,
        }
    }
}

/// Every category.
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Categories", body = [CategoryResponse]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["categories"],
    operation_id = "listCategories",
    security([])
)]
#[get("")]
pub async fn list_categories(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CategoryResponse>>> {
    let categories = state.categories.list().await?;
    Ok(web::Json(categories.into_iter().map(Into::into).collect()))
}

/// Create a category. Admin only.
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Missing name", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["categories"],
    operation_id = "createCategory"
)]
#[post("")]
pub async fn create_category(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<CategoryRequest>,
) -> ApiResult<HttpResponse> {
    let category = state
        .categories
        .create(caller.identity(), payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(CategoryResponse::from(category)))
}
