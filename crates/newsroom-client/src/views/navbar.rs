//! Top navigation bar.

use super::AuthContext;
use crate::ClientError;

/// What the navigation bar shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavbarState {
    /// The session is still being resolved; nothing is shown.
    Hidden,
    /// Login and register links.
    SignedOut,
    /// The signed-in user and a logout action.
    SignedIn {
        /// Shown next to the logout action.
        email: String,
        /// Link to the admin panel, for editors and admins.
        admin_link: bool,
    },
}

/// Navigation bar over the shared session.
pub struct Navbar {
    auth: AuthContext,
}

impl Navbar {
    /// A bar reflecting `auth`.
    pub fn new(auth: AuthContext) -> Self {
        Self { auth }
    }

    /// Derive the bar from the session.
    pub fn state(&self) -> NavbarState {
        let session = self.auth.state();
        if session.loading {
            return NavbarState::Hidden;
        }
        match session.user {
            Some(user) => NavbarState::SignedIn {
                email: user.email,
                admin_link: user.role.is_staff(),
            },
            None => NavbarState::SignedOut,
        }
    }

    /// Log out of the shared session.
    pub fn sign_out(&self) -> Result<(), ClientError> {
        self.auth.sign_out()
    }
}
