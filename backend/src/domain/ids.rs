//! Entity identifiers.
//!
//! Every document is addressed by a UUID v4 generated by the backend. Each
//! collection gets its own newtype so a comment id can never be passed where
//! an article id is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raised when an identifier string is not a UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("identifier must be a valid UUID")]
pub struct InvalidId;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = InvalidId;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self).map_err(|_| InvalidId)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id!(
    /// Identifier of a user account.
    UserId
);
define_id!(
    /// Identifier of an article.
    ArticleId
);
define_id!(
    /// Identifier of a reader comment.
    CommentId
);
define_id!(
    /// Identifier of a category.
    CategoryId
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn parses_hyphenated_uuid() {
        let id: ArticleId = "3fa85f64-5717-4562-b3fc-2c963f66afa6"
            .parse()
            .expect("valid uuid");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[rstest]
    #[case("")]
    #[case("42")]
    #[case("not-an-id")]
    fn rejects_malformed_identifiers(#[case] raw: &str) {
        assert_eq!(raw.parse::<CommentId>(), Err(InvalidId));
    }

    #[rstest]
    fn serialises_as_plain_string() {
        let id = UserId::random();
        let value = serde_json::to_value(id).expect("serialise");
        assert_eq!(value, serde_json::Value::String(id.to_string()));
    }
}
