//! Articles in one category.

use super::Shared;
use crate::ApiClient;
use crate::models::{ArticleDetail, ArticleFilter};

const ARTICLES_FAILED: &str = "Failed to load articles";

/// What a category page renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryState {
    /// Articles in the category, newest first.
    pub articles: Vec<ArticleDetail>,
    /// A fetch is in flight; true before the first load.
    pub loading: bool,
    /// Inline error from the last fetch.
    pub error: Option<String>,
}

impl Default for CategoryState {
    fn default() -> Self {
        Self {
            articles: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

/// Category page for one category name.
pub struct CategoryView {
    client: ApiClient,
    category: String,
    state: Shared<CategoryState>,
}

impl CategoryView {
    /// A view for `category`, matched exactly by the server.
    pub fn new(client: ApiClient, category: impl Into<String>) -> Self {
        Self {
            client,
            category: category.into(),
            state: Shared::default(),
        }
    }

    /// Page heading, e.g. `"Sports News"` for `sports`.
    pub fn title(&self) -> String {
        let mut chars = self.category.chars();
        let capitalised: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        format!("{capitalised} News")
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> CategoryState {
        self.state.snapshot()
    }

    /// Fetch the articles whose category matches exactly; matching happens
    /// server-side.
    pub async fn load(&self) {
        self.state.update(|state| state.loading = true);
        let result = self
            .client
            .list_articles(&ArticleFilter::category(self.category.clone()))
            .await;
        self.state.update(|state| {
            state.loading = false;
            match result {
                Ok(articles) => {
                    state.articles = articles;
                    state.error = None;
                }
                Err(error) => state.error = Some(error.inline_message(ARTICLES_FAILED)),
            }
        });
    }
}
