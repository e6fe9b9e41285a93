//! Single article page with its comment thread.

use uuid::Uuid;

use super::Shared;
use crate::ApiClient;
use crate::models::{ArticleComment, ArticleDetail};

const ARTICLE_FAILED: &str = "Failed to load article";
const COMMENT_FAILED: &str = "Failed to post comment";
const SIGN_IN_TO_COMMENT: &str = "Please sign in to comment";

/// What the article page renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleState {
    /// The article, once loaded.
    pub article: Option<ArticleDetail>,
    /// Unsent comment text.
    pub draft: String,
    /// Inline error from the last failed action.
    pub error: Option<String>,
}

/// One article and its comment form.
pub struct ArticleView {
    client: ApiClient,
    id: Uuid,
    state: Shared<ArticleState>,
}

impl ArticleView {
    /// A view for article `id`; nothing is fetched until [`ArticleView::load`].
    pub fn new(client: ApiClient, id: Uuid) -> Self {
        Self {
            client,
            id,
            state: Shared::default(),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ArticleState {
        self.state.snapshot()
    }

    /// Fetch the article with its comments.
    pub async fn load(&self) {
        let result = self.client.get_article(self.id).await;
        self.state.update(|state| match result {
            Ok(article) => state.article = Some(article),
            Err(error) => state.error = Some(error.inline_message(ARTICLE_FAILED)),
        });
    }

    /// Replace the unsent comment text.
    pub fn set_draft(&self, text: &str) {
        self.state.update(|state| state.draft = text.to_owned());
    }

    /// Post the draft. On success the comment is appended to the local
    /// thread and the draft cleared; on failure the draft is kept.
    ///
    /// Blank drafts are ignored.
    pub async fn submit_comment(&self) {
        let draft = self.state.update(|state| state.draft.clone());
        if draft.trim().is_empty() {
            return;
        }
        match self.client.has_token() {
            Ok(true) => {}
            Ok(false) => {
                self.state
                    .update(|state| state.error = Some(SIGN_IN_TO_COMMENT.to_owned()));
                return;
            }
            Err(error) => {
                self.state
                    .update(|state| state.error = Some(error.inline_message(COMMENT_FAILED)));
                return;
            }
        }

        // The server's message is not surfaced here.
        let result = self.client.create_comment(self.id, &draft).await;
        self.state.update(|state| match result {
            Ok(comment) => {
                if let Some(article) = state.article.as_mut() {
                    article.comments.push(ArticleComment::from(comment));
                }
                state.draft.clear();
                state.error = None;
            }
            Err(_) => state.error = Some(COMMENT_FAILED.to_owned()),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeTransport, sample_article};
    use crate::transport::Method;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    struct Page {
        fake: FakeTransport,
        id: Uuid,
        view: ArticleView,
    }

    #[fixture]
    fn page() -> Page {
        let fake = FakeTransport::new();
        let article: Value = sample_article("Reform", "Politics");
        let id: Uuid = serde_json::from_value(article["id"].clone()).expect("id");
        fake.respond(Method::Get, &format!("/api/articles/{id}"), 200, article);
        let view = ArticleView::new(fake.client(), id);
        Page { fake, id, view }
    }

    fn comment_reply(article: Uuid, content: &str) -> Value {
        json!({
            "id": Uuid::new_v4(),
            "article": article,
            "user": Uuid::new_v4(),
            "content": content,
            "date": "2026-01-02T00:00:00Z",
            "approved": false
        })
    }

    #[rstest]
    #[tokio::test]
    async fn load_shows_article(page: Page) {
        page.view.load().await;
        let state = page.view.state();
        assert_eq!(state.article.map(|a| a.title), Some("Reform".to_owned()));
        assert_eq!(state.error, None);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_article_shows_server_message() {
        let fake = FakeTransport::new();
        let view = ArticleView::new(fake.client(), Uuid::new_v4());
        view.load().await;
        assert_eq!(view.state().error.as_deref(), Some("Route not found"));
    }

    #[rstest]
    #[tokio::test]
    async fn acknowledged_comment_is_appended(page: Page) {
        page.fake.sign_in("token");
        page.fake
            .respond(Method::Post, "/api/comments", 201, comment_reply(page.id, "Nice"));
        page.view.load().await;
        page.view.set_draft("Nice");

        page.view.submit_comment().await;

        let state = page.view.state();
        let comments = state.article.expect("article").comments;
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].content, "Nice");
        assert!(!comments[0].approved);
        assert!(state.draft.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn rejected_comment_keeps_draft(page: Page) {
        page.fake.sign_in("token");
        page.fake.respond(
            Method::Post,
            "/api/comments",
            400,
            json!({ "message": "content is required" }),
        );
        page.view.load().await;
        page.view.set_draft("Nice");

        page.view.submit_comment().await;

        let state = page.view.state();
        assert_eq!(state.error.as_deref(), Some(COMMENT_FAILED));
        assert_eq!(state.draft, "Nice");
        assert!(state.article.expect("article").comments.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn signed_out_reader_is_asked_to_sign_in(page: Page) {
        page.view.load().await;
        page.view.set_draft("Nice");

        page.view.submit_comment().await;

        assert_eq!(page.view.state().error.as_deref(), Some(SIGN_IN_TO_COMMENT));
        assert!(page.fake.requests_to(Method::Post, "/api/comments").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn blank_draft_sends_nothing(page: Page) {
        page.fake.sign_in("token");
        page.view.set_draft("   ");
        page.view.submit_comment().await;
        assert!(page.fake.requests().is_empty());
    }
}
