//! Profile page: email and reading preferences.

use tracing::warn;

use super::{GENERIC_FAILURE, Shared};
use crate::ApiClient;
use crate::models::{Category, Preferences, User};

/// What the profile page renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileState {
    /// The signed-in user, once loaded.
    pub user: Option<User>,
    /// Every category the reader may subscribe to.
    pub categories: Vec<Category>,
    /// Edited preferences, submitted as a whole.
    pub preferences: Preferences,
    /// A save is in flight.
    pub saving: bool,
    /// The last save succeeded and nothing changed since.
    pub saved: bool,
    /// Inline error from the last save.
    pub error: Option<String>,
    /// No token, or the token no longer resolves to a user.
    pub needs_sign_in: bool,
}

/// Profile page for the signed-in user.
pub struct ProfileView {
    client: ApiClient,
    state: Shared<ProfileState>,
}

impl ProfileView {
    /// A view that has not loaded yet.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Shared::default(),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ProfileState {
        self.state.snapshot()
    }

    /// Load the user and the category list. Without a usable token the
    /// view asks for sign-in instead.
    pub async fn load(&self) {
        if !self.client.has_token().unwrap_or(false) {
            self.state.update(|state| state.needs_sign_in = true);
            return;
        }
        let (user, categories) =
            tokio::join!(self.client.current_user(), self.client.list_categories());
        let categories = categories.unwrap_or_else(|error| {
            warn!(%error, "category list unavailable for profile");
            Vec::new()
        });
        self.state.update(|state| {
            state.categories = categories;
            match user {
                Ok(user) => {
                    state.preferences = user.preferences.clone();
                    state.user = Some(user);
                }
                Err(_) => state.needs_sign_in = true,
            }
        });
    }

    /// Subscribe to or unsubscribe from `category`.
    pub fn toggle_category(&self, category: &str) {
        self.state.update(|state| {
            let selected = &mut state.preferences.categories;
            if let Some(position) = selected.iter().position(|name| name == category) {
                selected.remove(position);
            } else {
                selected.push(category.to_owned());
            }
            state.saved = false;
        });
    }

    /// Turn notifications on or off.
    pub fn set_notifications(&self, enabled: bool) {
        self.state.update(|state| {
            state.preferences.notifications = enabled;
            state.saved = false;
        });
    }

    /// Replace the stored preferences with the edited ones.
    pub async fn submit(&self) {
        let preferences = self.state.update(|state| {
            state.saving = true;
            state.saved = false;
            state.error = None;
            state.preferences.clone()
        });
        let result = self.client.update_preferences(&preferences).await;
        self.state.update(|state| {
            state.saving = false;
            match result {
                Ok(user) => {
                    state.user = Some(user);
                    state.saved = true;
                }
                Err(error) => state.error = Some(error.inline_message(GENERIC_FAILURE)),
            }
        });
    }
}
