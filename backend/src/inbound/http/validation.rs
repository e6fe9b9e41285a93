//! Shared validation helpers for inbound HTTP adapters.
//!
//! Covers request-shape failures the domain never sees: missing or malformed
//! body fields, unparsable JSON, path identifiers that are not UUIDs and
//! requests for routes that do not exist.

use std::fmt::Display;
use std::str::FromStr;

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, web};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidJson,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidJson => "invalid_json",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} is required")).with_details(json!({
        "field": field,
        "code": ErrorCode::MissingField.as_str(),
    }))
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidUuid.as_str(),
    }))
}

/// Parse a required UUID-backed identifier from a request body field.
pub(crate) fn parse_body_id<T: FromStr>(value: Option<String>, field: FieldName) -> Result<T, Error> {
    let raw = value
        .filter(|raw| !raw.trim().is_empty())
        .ok_or_else(|| missing_field_error(field))?;
    raw.trim()
        .parse()
        .map_err(|_| invalid_uuid_error(field, &raw))
}

/// Parse an identifier from a path segment.
///
/// A malformed identifier cannot name a stored entity, so it is reported the
/// same way as an unknown one.
pub(crate) fn parse_path_id<T: FromStr>(raw: &str, not_found: fn() -> Error) -> Result<T, Error> {
    raw.parse().map_err(|_| not_found())
}

/// JSON extractor settings turning body errors into `400` domain errors.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use newsroom::inbound::http::validation::json_config;
///
/// let _app = App::new().app_data(json_config());
/// ```
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

fn invalid_json_error(reason: impl Display) -> Error {
    debug!(error = %reason, "rejected request body");
    Error::invalid_request("Invalid JSON body").with_details(json!({
        "code": ErrorCode::InvalidJson.as_str(),
        "reason": reason.to_string(),
    }))
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    invalid_json_error(err).into()
}

/// Decode a JSON body read as raw bytes. Handlers use this when the caller's
/// role must be checked before the body is looked at.
pub(crate) fn parse_json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body).map_err(invalid_json_error)
}

/// Fallback handler for unmatched routes.
pub async fn route_not_found() -> Result<web::Json<()>, Error> {
    Err(Error::not_found("Route not found"))
}
