//! Client-side failures.

use thiserror::Error;

use crate::session::SessionError;

/// Errors raised by [`ApiClient`](crate::ApiClient) calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced an HTTP response.
    #[error("transport failed: {message}")]
    Transport {
        /// What the transport reported.
        message: String,
    },
    /// The server answered with a non-success status.
    #[error("server responded with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// The `message` field of the error body, when present.
        message: Option<String>,
    },
    /// A success response did not match the expected shape.
    #[error("unexpected response body: {message}")]
    Decode {
        /// Why decoding failed.
        message: String,
    },
    /// Reading or writing the stored token failed.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ClientError {
    /// The server's message string, if the server supplied one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } => Some(message.as_str()),
            _ => None,
        }
    }

    /// HTTP status of a rejected request.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The inline message a view shows: the server's message when present,
    /// otherwise `fallback`.
    pub fn inline_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_owned()
    }
}
