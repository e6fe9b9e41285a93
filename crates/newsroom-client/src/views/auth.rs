//! Session state plus the login and registration forms.

use tracing::{debug, warn};

use super::{GENERIC_FAILURE, Shared};
use crate::models::User;
use crate::{ApiClient, ClientError};

/// Who is signed in, as last fetched from `/api/users/me`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    /// The signed-in user, if any.
    pub user: Option<User>,
    /// True until the first [`AuthContext::fetch_user`] completes.
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

/// Session state shared by every page. Cheap to clone.
#[derive(Clone)]
pub struct AuthContext {
    client: ApiClient,
    state: Shared<AuthState>,
}

impl AuthContext {
    /// A session that has not fetched its user yet.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Shared::default(),
        }
    }

    /// The client shared by every page.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Snapshot of the session.
    pub fn state(&self) -> AuthState {
        self.state.snapshot()
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<User> {
        self.state.update(|state| state.user.clone())
    }

    /// Refresh the signed-in user from the stored token.
    ///
    /// Any failure, including a rejected or expired token, leaves the
    /// session signed out. The token itself stays stored.
    pub async fn fetch_user(&self) {
        let user = match self.client.has_token() {
            Ok(true) => match self.client.current_user().await {
                Ok(user) => Some(user),
                Err(error) => {
                    debug!(%error, "stored token did not resolve to a user");
                    None
                }
            },
            Ok(false) => None,
            Err(error) => {
                warn!(%error, "could not read stored token");
                None
            }
        };
        self.state.update(|state| {
            state.user = user;
            state.loading = false;
        });
    }

    /// Forget the token and the user.
    pub fn sign_out(&self) -> Result<(), ClientError> {
        self.state.update(|state| state.user = None);
        self.client.sign_out()
    }
}

/// Progress of a credential form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitState {
    /// A submission is in flight.
    pub submitting: bool,
    /// Inline error from the last submission.
    pub error: Option<String>,
    /// Set once the session holds a fetched user.
    pub signed_in: bool,
}

/// Login form.
pub struct LoginView {
    auth: AuthContext,
    state: Shared<SubmitState>,
}

impl LoginView {
    /// An idle login form.
    pub fn new(auth: AuthContext) -> Self {
        Self {
            auth,
            state: Shared::default(),
        }
    }

    /// Snapshot of the form.
    pub fn state(&self) -> SubmitState {
        self.state.snapshot()
    }

    /// Log in, store the token and refresh the session user.
    pub async fn submit(&self, email: &str, password: &str) {
        begin(&self.state);
        let result = self.auth.client().login(email, password).await;
        finish(&self.state, &self.auth, result.map(drop)).await;
    }
}

/// Registration form.
pub struct RegisterView {
    auth: AuthContext,
    state: Shared<SubmitState>,
}

impl RegisterView {
    /// An idle registration form.
    pub fn new(auth: AuthContext) -> Self {
        Self {
            auth,
            state: Shared::default(),
        }
    }

    /// Snapshot of the form.
    pub fn state(&self) -> SubmitState {
        self.state.snapshot()
    }

    /// Create the account, then sign in with the same credentials.
    pub async fn submit(&self, email: &str, password: &str) {
        begin(&self.state);
        let client = self.auth.client();
        let result = match client.register(email, password).await {
            Ok(_) => client.login(email, password).await.map(drop),
            Err(error) => Err(error),
        };
        finish(&self.state, &self.auth, result).await;
    }
}

fn begin(state: &Shared<SubmitState>) {
    state.update(|state| {
        state.submitting = true;
        state.error = None;
    });
}

async fn finish(state: &Shared<SubmitState>, auth: &AuthContext, result: Result<(), ClientError>) {
    if result.is_ok() {
        auth.fetch_user().await;
    }
    let signed_in = auth.user().is_some();
    state.update(|state| {
        state.submitting = false;
        match result {
            Ok(()) => state.signed_in = signed_in,
            Err(error) => state.error = Some(error.inline_message(GENERIC_FAILURE)),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::test_support::{FakeTransport, sample_user};
    use crate::transport::Method;
    use rstest::rstest;
    use serde_json::json;

    fn token_reply() -> serde_json::Value {
        json!({ "token": "t0k3n", "expiresAt": "2026-01-01T01:00:00Z" })
    }

    #[rstest]
    #[tokio::test]
    async fn fetch_without_token_signs_out_without_a_request() {
        let fake = FakeTransport::new();
        let auth = AuthContext::new(fake.client());
        assert!(auth.state().loading);

        auth.fetch_user().await;

        assert_eq!(auth.state(), AuthState { user: None, loading: false });
        assert!(fake.requests().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn rejected_token_leaves_session_signed_out() {
        let fake = FakeTransport::new();
        fake.sign_in("expired");
        fake.respond(
            Method::Get,
            "/api/users/me",
            401,
            json!({ "message": "Invalid token" }),
        );
        let auth = AuthContext::new(fake.client());

        auth.fetch_user().await;

        assert_eq!(auth.user(), None);
        assert!(!auth.state().loading);
    }

    #[rstest]
    #[tokio::test]
    async fn login_stores_token_and_fetches_user() {
        let fake = FakeTransport::new();
        fake.respond(Method::Post, "/api/users/login", 200, token_reply());
        fake.respond(Method::Get, "/api/users/me", 200, sample_user("editor"));
        let auth = AuthContext::new(fake.client());
        let view = LoginView::new(auth.clone());

        view.submit("editor@example.com", "pw").await;

        assert_eq!(
            view.state(),
            SubmitState { submitting: false, error: None, signed_in: true }
        );
        assert_eq!(auth.user().map(|u| u.role), Some(Role::Editor));
        let me = fake.requests_to(Method::Get, "/api/users/me");
        assert_eq!(me[0].bearer.as_deref(), Some("t0k3n"));
    }

    #[rstest]
    #[case(json!({ "message": "Invalid password" }), "Invalid password")]
    #[case(json!({}), GENERIC_FAILURE)]
    #[tokio::test]
    async fn login_failure_shows_message(
        #[case] body: serde_json::Value,
        #[case] expected: &str,
    ) {
        let fake = FakeTransport::new();
        fake.respond(Method::Post, "/api/users/login", 401, body);
        let view = LoginView::new(AuthContext::new(fake.client()));

        view.submit("a@b.c", "wrong").await;

        let state = view.state();
        assert_eq!(state.error.as_deref(), Some(expected));
        assert!(!state.signed_in);
        assert!(fake.requests_to(Method::Get, "/api/users/me").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn register_then_signs_in() {
        let fake = FakeTransport::new();
        fake.respond(
            Method::Post,
            "/api/users/register",
            201,
            sample_user("registered"),
        );
        fake.respond(Method::Post, "/api/users/login", 200, token_reply());
        fake.respond(Method::Get, "/api/users/me", 200, sample_user("registered"));
        let auth = AuthContext::new(fake.client());
        let view = RegisterView::new(auth.clone());

        view.submit("user@test.com", "pw123456").await;

        assert!(view.state().signed_in);
        let paths: Vec<String> = fake.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(
            paths,
            ["/api/users/register", "/api/users/login", "/api/users/me"]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_registration_does_not_log_in() {
        let fake = FakeTransport::new();
        fake.respond(
            Method::Post,
            "/api/users/register",
            400,
            json!({ "message": "Email already registered" }),
        );
        let view = RegisterView::new(AuthContext::new(fake.client()));

        view.submit("user@test.com", "pw").await;

        assert_eq!(
            view.state().error.as_deref(),
            Some("Email already registered")
        );
        assert_eq!(fake.requests().len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn sign_out_clears_user_and_token() {
        let fake = FakeTransport::new();
        fake.respond(Method::Post, "/api/users/login", 200, token_reply());
        fake.respond(Method::Get, "/api/users/me", 200, sample_user("admin"));
        let auth = AuthContext::new(fake.client());
        LoginView::new(auth.clone()).submit("admin@example.com", "pw").await;

        auth.sign_out().expect("sign out");

        assert_eq!(auth.user(), None);
        assert!(!auth.client().has_token().expect("session"));
    }
}
