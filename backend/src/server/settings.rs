//! Server settings loaded via OrthoConfig.

use std::net::SocketAddr;

use newsroom::domain::{CommentVisibility, UnknownCommentVisibility};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Settings that failed to parse after loading.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid public comment visibility: {0}")]
    PublicComments(#[from] UnknownCommentVisibility),
}

/// Configuration values read from CLI flags, `NEWSROOM_*` environment
/// variables and configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "NEWSROOM")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Seed demo data on startup when the user collection is empty.
    #[ortho_config(default = false)]
    pub seed_demo_data: bool,
    /// Which comments public article reads include: `all` or `approved`.
    pub public_comments: Option<String>,
}

impl ServerSettings {
    /// Return the configured bind address, falling back to the default.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim()
            .parse()
            .map_err(|source| SettingsError::BindAddr {
                value: raw.to_owned(),
                source,
            })
    }

    /// Return the configured comment visibility, falling back to `all`.
    pub fn comment_visibility(&self) -> Result<CommentVisibility, SettingsError> {
        match self.public_comments.as_deref() {
            Some(raw) => Ok(raw.parse()?),
            None => Ok(CommentVisibility::default()),
        }
    }

    /// Return the database URL when one is configured and non-blank.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}
