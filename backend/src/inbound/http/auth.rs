//! Bearer-token authentication for HTTP handlers.
//!
//! Handlers that require a caller take an [`Authenticated`] argument. The
//! extractor reads `Authorization: Bearer <token>` and verifies it through the
//! [`TokenService`](crate::domain::ports::TokenService) held in
//! [`HttpState`]. Role checks stay in the domain services.

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, web};
use tracing::debug;

use crate::domain::{Error, Identity};

use super::state::HttpState;

const BEARER: &str = "bearer";

/// Verified caller identity.
///
/// # Examples
/// ```
/// use actix_web::{get, HttpResponse};
/// use newsroom::inbound::http::auth::Authenticated;
///
/// #[get("/whoami")]
/// async fn whoami(caller: Authenticated) -> HttpResponse {
///     HttpResponse::Ok().body(caller.identity().role.to_string())
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authenticated(Identity);

impl Authenticated {
    /// The caller's user id and role.
    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.0
    }
}

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map(Self))
    }
}

fn authenticate(req: &HttpRequest) -> Result<Identity, Error> {
    let token = bearer_token(req.headers())
        .ok_or_else(|| Error::unauthenticated("No token provided"))?;
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not registered"))?;
    state.tokens.verify(token).map_err(|err| {
        debug!(error = %err, "bearer token rejected");
        Error::invalid_token("Invalid token")
    })
}

/// Token part of a `Bearer` authorisation header. The scheme is matched
/// case-insensitively; any other scheme counts as no token.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case(BEARER) && !token.is_empty()).then_some(token)
}
