//! Typed client and view models for the newsroom REST API.
//!
//! The crate mirrors the pages of the newsroom web front end without any
//! rendering: each view owns its state, talks to the backend through an
//! [`ApiClient`], and exposes the inline error message a page would show.
//!
//! # Overview
//!
//! - [`transport`]: the [`Transport`] seam and its `reqwest` implementation.
//! - [`session`]: bearer token persistence, in memory or in a file.
//! - [`search`]: debounce timer and request generations for search fields.
//! - [`views`]: home, category, article, login/register, profile, admin
//!   panel and navigation bar state.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use newsroom_client::session::MemorySessionStore;
//! use newsroom_client::transport::ReqwestTransport;
//! use newsroom_client::views::HomeView;
//! use newsroom_client::ApiClient;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = ReqwestTransport::new("http://localhost:3000".parse()?, Duration::from_secs(10))?;
//! let client = ApiClient::new(Arc::new(transport), Arc::new(MemorySessionStore::default()));
//! let home = HomeView::new(client);
//! home.load().await;
//! home.set_query("reform");
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

mod api;
mod error;
/// Wire types shared with the backend.
pub mod models;
/// Debounce and staleness tracking for search inputs.
pub mod search;
/// Bearer token storage.
pub mod session;
/// The HTTP seam.
pub mod transport;
/// Page-level view state.
pub mod views;

#[cfg(test)]
mod test_support;

pub use api::ApiClient;
pub use error::ClientError;
pub use transport::Transport;
