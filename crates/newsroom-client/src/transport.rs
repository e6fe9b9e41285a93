//! The HTTP seam between [`ApiClient`](crate::ApiClient) and the network.
//!
//! [`ReqwestTransport`] owns transport details only: URL joining, bearer
//! headers, JSON bodies and timeouts. Status interpretation and decoding live
//! in the client so fakes can stand in for the network in tests.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::ClientError;

/// HTTP verbs the API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// One API call, relative to the server base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP verb.
    pub method: Method,
    /// Absolute path such as `/api/articles`.
    pub path: String,
    /// Query string pairs, in order.
    pub query: Vec<(String, String)>,
    /// Token sent as `Authorization: Bearer <token>`.
    pub bearer: Option<String>,
    /// JSON body, if any.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// A request with no query, token or body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            bearer: None,
            body: None,
        }
    }
}

/// Raw status and body of a completed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends [`ApiRequest`]s and returns whatever the server answered.
///
/// Implementations report non-success statuses as ordinary responses and
/// reserve errors for calls that produced no response at all.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one call.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError>;
}

/// [`Transport`] over a `reqwest` client with a fixed base URL.
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
}

impl ReqwestTransport {
    /// Build a transport using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }
}

fn map_transport_error(error: reqwest::Error) -> ClientError {
    ClientError::Transport {
        message: error.to_string(),
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let url = self
            .base_url
            .join(&request.path)
            .map_err(|error| ClientError::Transport {
                message: format!("invalid request path {}: {error}", request.path),
            })?;
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok(ApiResponse {
            status,
            body: body.to_vec(),
        })
    }
}
