//! Users API handlers.
//!
//! ```text
//! POST   /api/users/register     {"email":"a@b.c","password":"pw"}
//! POST   /api/users/login        {"email":"a@b.c","password":"pw"}
//! GET    /api/users/me
//! PUT    /api/users/preferences  {"preferences":{"categories":[],"notifications":true}}
//! GET    /api/users/all
//! DELETE /api/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::IssuedToken;
use crate::domain::{
    ApiResult, Credentials, CredentialsValidationError, Error, Preferences, Role, User, UserId,
};
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, parse_path_id};

/// Credentials body for `POST /api/users/register` and `POST /api/users/login`.
///
/// Example JSON:
/// `{"email":"reader@example.com","password":"pw123456"}`
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    #[schema(example = "reader@example.com")]
    pub email: Option<String>,
    #[schema(example = "pw123456")]
    pub password: Option<String>,
}

impl TryFrom<CredentialsRequest> for Credentials {
    type Error = CredentialsValidationError;

    fn try_from(value: CredentialsRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(value.email.as_deref(), value.password.as_deref())
    }
}

fn map_credentials_error(err: CredentialsValidationError) -> Error {
    let field = match err {
        CredentialsValidationError::EmptyEmail => "email",
        CredentialsValidationError::EmptyPassword => "password",
    };
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": field, "code": "missing_field" }))
}

/// Account as returned to clients. Never carries the password digest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    #[schema(example = "reader@example.com")]
    pub email: String,
    pub role: Role,
    pub preferences: Preferences,
    pub bookmarks: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: *user.id.as_uuid(),
            email: user.email.into(),
            role: user.role,
            preferences: user.preferences,
            bookmarks: user.bookmarks.iter().map(|id| *id.as_uuid()).collect(),
            created_at: user.created_at,
        }
    }
}

/// Issued bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl From<IssuedToken> for LoginResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            expires_at: issued.expires_at,
        }
    }
}

/// Body for `PUT /api/users/preferences`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesRequest {
    pub preferences: Option<Preferences>,
}

/// Create a `registered` account.
#[utoipa::path(
    post,
    path = "/api/users/register",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Missing field or email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        Credentials::try_from(payload.into_inner()).map_err(map_credentials_error)?;
    let user = state.users.register(&credentials).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Exchange credentials for a bearer token valid for one hour.
#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Missing field", body = Error),
        (status = 401, description = "Invalid password", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials =
        Credentials::try_from(payload.into_inner()).map_err(map_credentials_error)?;
    let issued = state.users.login(&credentials).await?;
    Ok(web::Json(issued.into()))
}

/// Profile of the authenticated caller.
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    caller: Authenticated,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.users.current_user(caller.identity()).await?;
    Ok(web::Json(user.into()))
}

/// Replace the caller's preferences.
#[utoipa::path(
    put,
    path = "/api/users/preferences",
    request_body = PreferencesRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Missing preferences", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "updatePreferences"
)]
#[put("/preferences")]
pub async fn update_preferences(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<PreferencesRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let preferences = payload
        .into_inner()
        .preferences
        .ok_or_else(|| missing_field_error(FieldName::new("preferences")))?;
    let user = state
        .users
        .update_preferences(caller.identity(), preferences)
        .await?;
    Ok(web::Json(user.into()))
}

/// Every account. Admin only.
#[utoipa::path(
    get,
    path = "/api/users/all",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "No users found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/all")]
pub async fn list_users(
    state: web::Data<HttpState>,
    caller: Authenticated,
) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users.list_users(caller.identity()).await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Delete an account. Admin only.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Malformed id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id: UserId = parse_path_id(&path, || Error::not_found("User not found"))?;
    state.users.delete_user(caller.identity(), &id).await?;
    Ok(web::Json(MessageResponse::new("User deleted")))
}

#[cfg(test)]
mod tests;
