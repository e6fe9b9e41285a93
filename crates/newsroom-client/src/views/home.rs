//! Landing page: category links and the searchable article feed.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::Shared;
use crate::ApiClient;
use crate::models::{ArticleDetail, ArticleFilter, Category};
use crate::search::{Debouncer, Generations, SEARCH_DEBOUNCE};

const ARTICLES_FAILED: &str = "Failed to load articles";
const CATEGORIES_FAILED: &str = "Failed to load categories";

/// What the home page renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeState {
    /// Category links.
    pub categories: Vec<Category>,
    /// The feed, newest first.
    pub articles: Vec<ArticleDetail>,
    /// Search text as typed.
    pub query: String,
    /// A feed request is in flight.
    pub loading: bool,
    /// Inline error from the last failed fetch.
    pub error: Option<String>,
}

/// Home page view.
///
/// Typing into the search field goes through [`HomeView::set_query`], which
/// waits for a quiet period before fetching. Only the most recently started
/// feed request may update [`HomeState::articles`].
pub struct HomeView {
    client: ApiClient,
    state: Shared<HomeState>,
    generations: Arc<Generations>,
    debouncer: Debouncer,
}

impl HomeView {
    /// A view with the standard search debounce.
    pub fn new(client: ApiClient) -> Self {
        Self::with_debounce(client, SEARCH_DEBOUNCE)
    }

    /// A view waiting `delay` of quiet before each search.
    pub fn with_debounce(client: ApiClient, delay: Duration) -> Self {
        Self {
            client,
            state: Shared::default(),
            generations: Arc::new(Generations::default()),
            debouncer: Debouncer::new(delay),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> HomeState {
        self.state.snapshot()
    }

    /// Fetch categories and the unfiltered feed.
    pub async fn load(&self) {
        let feed = fetch_feed(
            self.client.clone(),
            self.state.clone(),
            Arc::clone(&self.generations),
            ArticleFilter::default(),
        );
        let categories = self.client.list_categories();
        let ((), categories) = tokio::join!(feed, categories);
        self.state.update(|state| match categories {
            Ok(categories) => state.categories = categories,
            Err(error) => state.error = Some(error.inline_message(CATEGORIES_FAILED)),
        });
    }

    /// Record the search text and schedule a feed refresh.
    ///
    /// Surrounding whitespace is ignored; a blank query restores the
    /// unfiltered feed. Must be called within a tokio runtime.
    pub fn set_query(&self, query: &str) {
        self.state.update(|state| state.query = query.to_owned());
        let trimmed = query.trim();
        let filter = if trimmed.is_empty() {
            ArticleFilter::default()
        } else {
            ArticleFilter::search(trimmed)
        };
        let task = fetch_feed(
            self.client.clone(),
            self.state.clone(),
            Arc::clone(&self.generations),
            filter,
        );
        self.debouncer.schedule(task);
    }
}

async fn fetch_feed(
    client: ApiClient,
    state: Shared<HomeState>,
    generations: Arc<Generations>,
    filter: ArticleFilter,
) {
    let generation = generations.begin();
    state.update(|state| state.loading = true);
    let result = client.list_articles(&filter).await;
    if !generations.is_current(generation) {
        debug!(generation, "dropping superseded feed response");
        return;
    }
    state.update(|state| {
        state.loading = false;
        match result {
            Ok(articles) => state.articles = articles,
            Err(error) => state.error = Some(error.inline_message(ARTICLES_FAILED)),
        }
    });
}
