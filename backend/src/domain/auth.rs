//! Roles, caller identity and the capability check guarding every
//! privileged operation.
//!
//! Inbound adapters decode a bearer token into an [`Identity`]; services then
//! call [`authorize`] with one of the role sets below before touching a
//! repository. Login credentials live here too so handlers validate raw input
//! before calling a service.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::{Error, UserId};

/// Account role. Assigned at registration and never changed through the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Guest,
    Registered,
    Editor,
    Admin,
}

impl Role {
    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::Registered => "registered",
            Self::Editor => "editor",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored or decoded role name is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guest" => Ok(Self::Guest),
            "registered" => Ok(Self::Registered),
            "editor" => Ok(Self::Editor),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// Admin only.
pub const ADMINS: &[Role] = &[Role::Admin];
/// Roles allowed to publish and moderate.
pub const EDITORS: &[Role] = &[Role::Admin, Role::Editor];
/// Every authenticated role except guests.
pub const MEMBERS: &[Role] = &[Role::Registered, Role::Editor, Role::Admin];

/// Caller identity decoded from a verified bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

impl Identity {
    /// Construct an identity.
    #[must_use]
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }
}

/// Fail with [`ErrorCode::Forbidden`](super::ErrorCode::Forbidden) unless the
/// caller's role is in `allowed`.
///
/// # Examples
/// ```
/// use newsroom::domain::{authorize, Identity, Role, UserId, EDITORS};
///
/// let editor = Identity::new(UserId::random(), Role::Editor);
/// assert!(authorize(&editor, EDITORS).is_ok());
///
/// let reader = Identity::new(UserId::random(), Role::Registered);
/// assert!(authorize(&reader, EDITORS).is_err());
/// ```
pub fn authorize(identity: &Identity, allowed: &[Role]) -> Result<(), Error> {
    if allowed.contains(&identity.role) {
        Ok(())
    } else {
        Err(Error::forbidden("Access denied"))
    }
}

/// Validation failures for login and registration input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    #[error("email is required")]
    EmptyEmail,
    #[error("password is required")]
    EmptyPassword,
}

/// Email and password pair supplied at login or registration.
///
/// ## Invariants
/// - `email` is trimmed and non-empty.
/// - `password` is non-empty and kept verbatim, zeroised on drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Validate raw input.
    pub fn try_from_parts(
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, CredentialsValidationError> {
        let email = email
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(CredentialsValidationError::EmptyEmail)?;
        let password = password
            .filter(|value| !value.is_empty())
            .ok_or(CredentialsValidationError::EmptyPassword)?;
        Ok(Self {
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for account lookup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Plaintext password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn identity(role: Role) -> Identity {
        Identity::new(UserId::random(), role)
    }

    #[rstest]
    #[case(Role::Admin, ADMINS, true)]
    #[case(Role::Editor, ADMINS, false)]
    #[case(Role::Editor, EDITORS, true)]
    #[case(Role::Registered, EDITORS, false)]
    #[case(Role::Registered, MEMBERS, true)]
    #[case(Role::Guest, MEMBERS, false)]
    fn authorize_checks_membership(
        #[case] role: Role,
        #[case] allowed: &[Role],
        #[case] permitted: bool,
    ) {
        let result = authorize(&identity(role), allowed);
        match (permitted, result) {
            (true, Ok(())) => {}
            (false, Err(err)) => assert_eq!(err.code(), ErrorCode::Forbidden),
            (expected, other) => panic!("expected permitted={expected}, got {other:?}"),
        }
    }

    #[rstest]
    #[case("guest", Role::Guest)]
    #[case("registered", Role::Registered)]
    #[case("editor", Role::Editor)]
    #[case("admin", Role::Admin)]
    fn role_names_round_trip(#[case] raw: &str, #[case] role: Role) {
        assert_eq!(raw.parse::<Role>(), Ok(role));
        assert_eq!(role.as_str(), raw);
    }

    #[rstest]
    fn unknown_role_is_rejected() {
        assert_eq!("owner".parse::<Role>(), Err(UnknownRole("owner".to_owned())));
    }

    #[rstest]
    #[case(None, Some("pw"), CredentialsValidationError::EmptyEmail)]
    #[case(Some("   "), Some("pw"), CredentialsValidationError::EmptyEmail)]
    #[case(Some("a@b.c"), None, CredentialsValidationError::EmptyPassword)]
    #[case(Some("a@b.c"), Some(""), CredentialsValidationError::EmptyPassword)]
    fn credentials_reject_missing_parts(
        #[case] email: Option<&str>,
        #[case] password: Option<&str>,
        #[case] expected: CredentialsValidationError,
    ) {
        assert_eq!(Credentials::try_from_parts(email, password), Err(expected));
    }

    #[rstest]
    fn credentials_trim_email_but_keep_password() {
        let creds = Credentials::try_from_parts(Some("  reader@example.com "), Some(" pw "))
            .expect("valid credentials");
        assert_eq!(creds.email(), "reader@example.com");
        assert_eq!(creds.password(), " pw ");
    }
}
