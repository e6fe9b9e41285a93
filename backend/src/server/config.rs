//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use newsroom::domain::CommentVisibility;
use newsroom::inbound::http::token_config::TokenSecret;
use newsroom::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) token_secret: TokenSecret,
    pub(crate) comment_visibility: CommentVisibility,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration with the in-memory store and every
    /// comment visible on public reads.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, token_secret: TokenSecret) -> Self {
        Self {
            bind_addr,
            token_secret,
            comment_visibility: CommentVisibility::All,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the persistence adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Choose which comments public article reads include.
    #[must_use]
    pub fn with_comment_visibility(mut self, visibility: CommentVisibility) -> Self {
        self.comment_visibility = visibility;
        self
    }
}
