//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::ports::{
    MockArticleService, MockCategoryService, MockCommentService, MockTokenService,
    MockUserService, TokenService,
};

use super::state::HttpState;

/// State whose services are expectation-free mocks; only `tokens` is live.
///
/// Any service call panics, which is what auth-only tests want.
pub fn state_with_tokens(tokens: Arc<dyn TokenService>) -> HttpState {
    HttpState {
        users: Arc::new(MockUserService::new()),
        articles: Arc::new(MockArticleService::new()),
        comments: Arc::new(MockCommentService::new()),
        categories: Arc::new(MockCategoryService::new()),
        tokens,
    }
}

/// State with every port mocked. Set expectations before wrapping in `Arc`.
pub struct MockPorts {
    pub users: MockUserService,
    pub articles: MockArticleService,
    pub comments: MockCommentService,
    pub categories: MockCategoryService,
    pub tokens: MockTokenService,
}

impl Default for MockPorts {
    fn default() -> Self {
        Self {
            users: MockUserService::new(),
            articles: MockArticleService::new(),
            comments: MockCommentService::new(),
            categories: MockCategoryService::new(),
            tokens: MockTokenService::new(),
        }
    }
}

impl From<MockPorts> for HttpState {
    fn from(ports: MockPorts) -> Self {
        Self {
            users: Arc::new(ports.users),
            articles: Arc::new(ports.articles),
            comments: Arc::new(ports.comments),
            categories: Arc::new(ports.categories),
            tokens: Arc::new(ports.tokens),
        }
    }
}
