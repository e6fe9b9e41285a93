//! Helpers shared by unit and integration tests.

use std::sync::{Arc, Mutex};

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{PasswordHasher, TokenService, UserRepository};
use crate::domain::{
    ArticleServiceImpl, CategoryServiceImpl, CommentServiceImpl, CommentVisibility, Email, Error,
    Identity, Role, User, UserServiceImpl,
};
use crate::inbound::http::configure_api;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::route_not_found;
use crate::middleware::Trace;
use crate::outbound::memory::MemoryStore;
use crate::outbound::security::{Argon2PasswordHasher, JwtTokenService};

/// Signing secret used by test stacks.
pub const TEST_TOKEN_SECRET: &[u8] = b"newsroom-test-secret-0123456789ab";

/// A clock that can be moved forward by hand.
#[derive(Debug)]
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Start the clock at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// A clock pinned at 2026-01-01T00:00:00Z.
    pub fn fixed() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Self::new(start)
    }

    /// Move the clock forward.
    pub fn advance_seconds(&self, seconds: i64) {
        let mut guard = self.0.lock().unwrap_or_else(|poison| poison.into_inner());
        *guard += TimeDelta::seconds(seconds);
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap_or_else(|poison| poison.into_inner())
    }
}

/// Argon2 with minimal cost parameters so tests stay fast.
pub fn fast_password_hasher() -> Argon2PasswordHasher {
    Argon2PasswordHasher::with_cost(8, 1, 1).unwrap_or_default()
}

/// The full service stack over an in-memory store, with a hand-driven clock.
pub struct TestStack {
    pub store: Arc<MemoryStore>,
    pub clock: Arc<MutableClock>,
    pub tokens: Arc<JwtTokenService>,
    pub state: HttpState,
}

impl Default for TestStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TestStack {
    /// Public article reads return every comment.
    pub fn new() -> Self {
        Self::with_visibility(CommentVisibility::All)
    }

    /// Choose which comments public article reads return.
    pub fn with_visibility(visibility: CommentVisibility) -> Self {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(MutableClock::fixed());
        let tokens = Arc::new(JwtTokenService::new(TEST_TOKEN_SECRET, clock.clone()));
        let state = HttpState {
            users: Arc::new(UserServiceImpl::new(
                store.clone(),
                Arc::new(fast_password_hasher()),
                tokens.clone(),
                clock.clone(),
            )),
            articles: Arc::new(ArticleServiceImpl::new(
                store.clone(),
                store.clone(),
                store.clone(),
                visibility,
                clock.clone(),
            )),
            comments: Arc::new(CommentServiceImpl::new(
                store.clone(),
                store.clone(),
                store.clone(),
                clock.clone(),
            )),
            categories: Arc::new(CategoryServiceImpl::new(store.clone())),
            tokens: tokens.clone(),
        };
        Self {
            store,
            clock,
            tokens,
            state,
        }
    }

    /// Insert an account directly, bypassing registration so any role can
    /// be created.
    pub async fn seed_user(&self, email: &str, password: &str, role: Role) -> Result<User, Error> {
        let email = Email::new(email).map_err(|err| Error::invalid_request(err.to_string()))?;
        let digest = fast_password_hasher()
            .hash(password)
            .map_err(|err| Error::internal(err.to_string()))?;
        let user = User::with_role(email, digest, role, self.clock.utc());
        UserRepository::insert(self.store.as_ref(), &user)
            .await
            .map_err(|err| Error::internal(err.to_string()))?;
        Ok(user)
    }

    /// `Authorization` header value for `user`.
    pub fn bearer_for(&self, user: &User) -> Result<String, Error> {
        let issued = self
            .tokens
            .issue(&Identity::new(user.id, user.role))
            .map_err(|err| Error::internal(err.to_string()))?;
        Ok(format!("Bearer {}", issued.token))
    }
}

/// The API routes, trace middleware and 404 fallback around `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(Trace)
        .app_data(web::Data::new(state))
        .configure(configure_api)
        .default_service(web::to(route_not_found))
}
