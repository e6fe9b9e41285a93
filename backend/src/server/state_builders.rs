//! Builders for repository adapters and the shared HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use newsroom::demo_data::DemoDataRepositories;
use newsroom::domain::ports::{
    ArticleRepository, CategoryRepository, CommentRepository, PasswordHasher, UserRepository,
};
use newsroom::domain::{
    ArticleServiceImpl, CategoryServiceImpl, CommentServiceImpl, CommentVisibility,
    UserServiceImpl,
};
use newsroom::inbound::http::state::HttpState;
use newsroom::outbound::memory::MemoryStore;
use newsroom::outbound::persistence::{
    DbPool, DieselArticleRepository, DieselCategoryRepository, DieselCommentRepository,
    DieselUserRepository,
};
use newsroom::outbound::security::{Argon2PasswordHasher, JwtTokenService};

/// Repository adapters for the four collections.
#[derive(Clone)]
pub struct Repositories {
    users: Arc<dyn UserRepository>,
    articles: Arc<dyn ArticleRepository>,
    comments: Arc<dyn CommentRepository>,
    categories: Arc<dyn CategoryRepository>,
    backend: &'static str,
}

impl Repositories {
    /// Diesel repositories when a pool is available, otherwise one shared
    /// in-memory store.
    pub fn from_pool(pool: Option<&DbPool>) -> Self {
        match pool {
            Some(pool) => Self {
                users: Arc::new(DieselUserRepository::new(pool.clone())),
                articles: Arc::new(DieselArticleRepository::new(pool.clone())),
                comments: Arc::new(DieselCommentRepository::new(pool.clone())),
                categories: Arc::new(DieselCategoryRepository::new(pool.clone())),
                backend: "postgres",
            },
            None => {
                let store = Arc::new(MemoryStore::new());
                Self {
                    users: store.clone(),
                    articles: store.clone(),
                    comments: store.clone(),
                    categories: store,
                    backend: "memory",
                }
            }
        }
    }

    /// Short name of the storage backend, for startup logs.
    pub fn backend(&self) -> &'static str {
        self.backend
    }

    /// The same adapters, bundled for demo data seeding.
    pub fn demo_data(&self) -> DemoDataRepositories {
        DemoDataRepositories {
            users: self.users.clone(),
            articles: self.articles.clone(),
            comments: self.comments.clone(),
            categories: self.categories.clone(),
        }
    }
}

/// Process-wide collaborators shared by every service.
pub struct StateDeps {
    pub secret: Vec<u8>,
    pub visibility: CommentVisibility,
    pub hasher: Arc<dyn PasswordHasher>,
    pub clock: Arc<dyn Clock>,
}

impl StateDeps {
    /// Production collaborators: Argon2 defaults and the system clock.
    pub fn new(secret: &[u8], visibility: CommentVisibility) -> Self {
        Self {
            secret: secret.to_vec(),
            visibility,
            hasher: Arc::new(Argon2PasswordHasher::default()),
            clock: Arc::new(DefaultClock),
        }
    }
}

/// Wire every domain service over `repositories`.
pub(super) fn build_http_state(repositories: &Repositories, deps: StateDeps) -> web::Data<HttpState> {
    let StateDeps {
        secret,
        visibility,
        hasher,
        clock,
    } = deps;
    let secret = zeroize::Zeroizing::new(secret);
    let tokens = Arc::new(JwtTokenService::new(&secret, clock.clone()));
    web::Data::new(HttpState {
        users: Arc::new(UserServiceImpl::new(
            repositories.users.clone(),
            hasher,
            tokens.clone(),
            clock.clone(),
        )),
        articles: Arc::new(ArticleServiceImpl::new(
            repositories.articles.clone(),
            repositories.comments.clone(),
            repositories.users.clone(),
            visibility,
            clock.clone(),
        )),
        comments: Arc::new(CommentServiceImpl::new(
            repositories.comments.clone(),
            repositories.articles.clone(),
            repositories.users.clone(),
            clock,
        )),
        categories: Arc::new(CategoryServiceImpl::new(repositories.categories.clone())),
        tokens,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test as actix_test};
    use newsroom::domain::{Credentials, Identity};
    use newsroom::inbound::http::configure_api;
    use newsroom::test_support::{MutableClock, TEST_TOKEN_SECRET, fast_password_hasher};
    use rstest::rstest;

    fn deps() -> StateDeps {
        StateDeps {
            secret: TEST_TOKEN_SECRET.to_vec(),
            visibility: CommentVisibility::All,
            hasher: Arc::new(fast_password_hasher()),
            clock: Arc::new(MutableClock::fixed()),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn pool_absent_selects_shared_memory_store() {
        let repositories = Repositories::from_pool(None);
        assert_eq!(repositories.backend(), "memory");
        let state = build_http_state(&repositories, deps());

        let credentials = Credentials::try_from_parts(Some("reader@example.com"), Some("pw123456"))
            .expect("credentials shape");
        let user = state.users.register(&credentials).await.expect("register");

        let stored = repositories
            .demo_data()
            .users
            .find_by_email("reader@example.com")
            .await
            .expect("lookup");
        assert_eq!(stored.map(|found| found.id), Some(user.id));
    }

    #[rstest]
    #[tokio::test]
    async fn issued_tokens_verify_against_the_same_state() {
        let repositories = Repositories::from_pool(None);
        let state = build_http_state(&repositories, deps());
        let credentials = Credentials::try_from_parts(Some("reader@example.com"), Some("pw123456"))
            .expect("credentials shape");
        let user = state.users.register(&credentials).await.expect("register");
        let issued = state.users.login(&credentials).await.expect("login");

        let identity: Identity = state.tokens.verify(&issued.token).expect("verify");
        assert_eq!(identity.user_id, user.id);
    }

    #[actix_web::test]
    async fn production_wiring_serves_requests_from_the_memory_store() {
        let state = build_http_state(
            &Repositories::from_pool(None),
            StateDeps::new(TEST_TOKEN_SECRET, CommentVisibility::All),
        );
        let app = actix_test::init_service(App::new().app_data(state).configure(configure_api)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/categories").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Vec<serde_json::Value> = actix_test::read_body_json(response).await;
        assert!(body.is_empty());
    }
}
