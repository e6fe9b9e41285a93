//! Page view models.
//!
//! A view owns a snapshot-able state struct and exposes
//! async actions that call the API and fold the outcome into that state.
//! Failed actions set the view's inline `error` to the server's message or a
//! per-action fallback. Actions never hold the state lock across an await.

use std::sync::{Arc, Mutex, PoisonError};

mod admin;
mod article;
mod auth;
mod category;
mod home;
mod navbar;
mod profile;

pub use admin::{AdminAccess, AdminPanelState, AdminPanelView, ArticleForm, UserRow};
pub use article::{ArticleState, ArticleView};
pub use auth::{AuthContext, AuthState, LoginView, RegisterView, SubmitState};
pub use category::{CategoryState, CategoryView};
pub use home::{HomeState, HomeView};
pub use navbar::{Navbar, NavbarState};
pub use profile::{ProfileState, ProfileView};

/// Fallback for credential and preference forms.
pub const GENERIC_FAILURE: &str = "An error occurred. Please try again.";

/// View state shared between a view and the tasks it spawns.
#[derive(Debug, Default)]
pub(crate) struct Shared<T>(Arc<Mutex<T>>);

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Shared<T> {
    pub(crate) fn new(value: T) -> Self {
        Self(Arc::new(Mutex::new(value)))
    }

    pub(crate) fn update<R>(&self, apply: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        apply(&mut guard)
    }
}

impl<T: Clone> Shared<T> {
    pub(crate) fn snapshot(&self) -> T {
        self.update(|state| state.clone())
    }
}
