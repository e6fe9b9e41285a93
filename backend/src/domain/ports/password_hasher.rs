//! Port for one-way password hashing.

use crate::domain::{Error, PasswordDigest};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hashing the plaintext failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored digest could not be parsed.
        MalformedDigest { message: String } => "stored password digest is malformed: {message}",
    }
    into Error {
        Hash { message } => Error::internal(format!("password hashing failed: {message}")),
        MalformedDigest { message } => Error::internal(format!("stored password digest is malformed: {message}")),
    }
}

/// Hashes and verifies passwords. Implementations must be salted so the
/// digest never equals the plaintext.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Derive a digest for storage.
    fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordHashError>;

    /// Whether `password` matches `digest`.
    fn verify(&self, password: &str, digest: &PasswordDigest) -> Result<bool, PasswordHashError>;
}
