//! Credential adapters: password digests and bearer tokens.

mod argon2_hasher;
mod jwt;

pub use argon2_hasher::Argon2PasswordHasher;
pub use jwt::{JwtTokenService, TOKEN_TTL_SECS};
