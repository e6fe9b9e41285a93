//! User accounts.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ArticleId, Role, UserId};

/// Validation errors for account fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("email is required")]
    EmptyEmail,
    #[error("email must look like name@domain")]
    MalformedEmail,
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Account email, unique across users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an email from raw input.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(trimmed) {
            return Err(UserValidationError::MalformedEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// PHC-formatted password digest. Never rendered in logs or responses.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap a digest produced by a [`PasswordHasher`](super::ports::PasswordHasher).
    pub fn new(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// PHC string for storage and verification.
    pub fn as_phc(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}

/// Reader preferences. Replaced wholesale on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Subscribed category names.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Whether the reader wants notifications.
    #[serde(default = "notifications_default")]
    pub notifications: bool,
}

const fn notifications_default() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            notifications: notifications_default(),
        }
    }
}

/// Application user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub password_digest: PasswordDigest,
    pub role: Role,
    pub preferences: Preferences,
    pub bookmarks: Vec<ArticleId>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// A freshly registered account with default preferences.
    pub fn register(email: Email, password_digest: PasswordDigest, now: DateTime<Utc>) -> Self {
        Self::with_role(email, password_digest, Role::Registered, now)
    }

    /// An account with an explicit role, used when seeding staff accounts.
    pub fn with_role(
        email: Email,
        password_digest: PasswordDigest,
        role: Role,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UserId::random(),
            email,
            password_digest,
            role,
            preferences: Preferences::default(),
            bookmarks: Vec::new(),
            created_at: now,
        }
    }
}

/// Public projection of a user used when resolving references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: UserId,
    pub email: Email,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("user@test.com")]
    #[case("  editor@example.com ")]
    fn email_accepts_simple_addresses(#[case] raw: &str) {
        let email = Email::new(raw).expect("valid email");
        assert_eq!(email.as_ref(), raw.trim());
    }

    #[rstest]
    #[case("", UserValidationError::EmptyEmail)]
    #[case("   ", UserValidationError::EmptyEmail)]
    #[case("no-at-sign", UserValidationError::MalformedEmail)]
    #[case("two@@signs", UserValidationError::MalformedEmail)]
    #[case("has space@example.com", UserValidationError::MalformedEmail)]
    fn email_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(Email::new(raw), Err(expected));
    }

    #[rstest]
    fn preferences_default_to_notifications_on() {
        let prefs: Preferences = serde_json::from_str("{}").expect("deserialise");
        assert_eq!(prefs, Preferences::default());
        assert!(prefs.notifications);
        assert!(prefs.categories.is_empty());
    }

    #[rstest]
    fn registration_assigns_registered_role() {
        let email = Email::new("user@test.com").expect("email");
        let user = User::register(email, PasswordDigest::new("$argon2id$stub"), Utc::now());
        assert_eq!(user.role, Role::Registered);
        assert!(user.bookmarks.is_empty());
    }

    #[rstest]
    fn digest_debug_is_redacted() {
        let digest = PasswordDigest::new("$argon2id$v=19$secret");
        assert!(!format!("{digest:?}").contains("secret"));
    }
}
