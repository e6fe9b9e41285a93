//! Port for issuing and verifying bearer tokens.
//!
//! Tokens are self-contained: nothing is stored server-side, so there is no
//! revocation and logout is a client concern.

use chrono::{DateTime, Utc};

use crate::domain::Identity;

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenError {
        /// The token is past its expiry.
        Expired => "token expired",
        /// Signature, structure or claims did not verify.
        Invalid { message: String } => "invalid token: {message}",
        /// Signing a new token failed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// A freshly signed bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Sign a token embedding `identity`.
    fn issue(&self, identity: &Identity) -> Result<IssuedToken, TokenError>;

    /// Verify `token` and return the identity it carries.
    fn verify(&self, token: &str) -> Result<Identity, TokenError>;
}
