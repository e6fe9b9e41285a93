//! HS256 bearer tokens.
//!
//! Claims are `{userId, role, iat, exp}` in seconds since the epoch. Expiry is
//! checked against the injected clock rather than the system clock, with no
//! leeway.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{IssuedToken, TokenError, TokenService};
use crate::domain::{Identity, Role, UserId};

/// Token lifetime in seconds.
pub const TOKEN_TTL_SECS: i64 = 3600;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    user_id: Uuid,
    role: Role,
    iat: i64,
    exp: i64,
}

/// [`TokenService`] signing with a shared HMAC secret.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl JwtTokenService {
    /// Build keys from `secret`. The caller owns and zeroises its copy.
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl: TimeDelta::seconds(TOKEN_TTL_SECS),
            clock,
        }
    }

    /// Override the token lifetime.
    #[must_use]
    pub fn with_ttl(mut self, ttl: TimeDelta) -> Self {
        self.ttl = ttl;
        self
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, identity: &Identity) -> Result<IssuedToken, TokenError> {
        let now = self.clock.utc();
        let expires_at: DateTime<Utc> = now + self.ttl;
        let claims = Claims {
            user_id: *identity.user_id.as_uuid(),
            role: identity.role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenError::signing(err.to_string()))?;
        Ok(IssuedToken { token, expires_at })
    }

    fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| TokenError::invalid(err.to_string()))?
            .claims;
        if self.clock.utc().timestamp() >= claims.exp {
            return Err(TokenError::expired());
        }
        Ok(Identity::new(UserId::from_uuid(claims.user_id), claims.role))
    }
}
