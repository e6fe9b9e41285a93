//! Token signing secret configuration.
//!
//! The HS256 secret is read once at startup through a [`mockable::Env`] so
//! the rules can be tested without touching the process environment:
//!
//! 1. `NEWSROOM_TOKEN_SECRET_FILE` (default `/var/run/secrets/token_secret`).
//! 2. `NEWSROOM_TOKEN_SECRET` when the file cannot be read.
//! 3. A random ephemeral secret in debug builds, or when
//!    `NEWSROOM_ALLOW_EPHEMERAL_SECRET` is truthy.
//!
//! Release builds reject secrets shorter than 32 bytes.

pub mod fingerprint;

use std::fmt;
use std::path::PathBuf;

use mockable::Env;
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::warn;
use zeroize::Zeroizing;

const SECRET_DEFAULT_PATH: &str = "/var/run/secrets/token_secret";
const SECRET_MIN_LEN: usize = 32;
const EPHEMERAL_LEN: usize = 64;
const SECRET_FILE_ENV: &str = "NEWSROOM_TOKEN_SECRET_FILE";
const SECRET_ENV: &str = "NEWSROOM_TOKEN_SECRET";
const ALLOW_EPHEMERAL_ENV: &str = "NEWSROOM_ALLOW_EPHEMERAL_SECRET";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

/// Build mode for secret validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate missing secrets and emit warnings.
    Debug,
    /// Release builds require a configured secret of adequate length.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use newsroom::inbound::http::token_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Where the active secret came from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SecretSource {
    File(PathBuf),
    Environment,
    Ephemeral,
}

impl fmt::Display for SecretSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "file {}", path.display()),
            Self::Environment => f.write_str(SECRET_ENV),
            Self::Ephemeral => f.write_str("ephemeral"),
        }
    }
}

/// Secret bytes, zeroised on drop.
pub struct TokenSecret {
    bytes: Zeroizing<Vec<u8>>,
    source: SecretSource,
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSecret")
            .field("source", &self.source)
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

impl TokenSecret {
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    pub fn source(&self) -> &SecretSource {
        &self.source
    }

    /// Truncated SHA-256 of the secret, safe to log.
    pub fn fingerprint(&self) -> String {
        fingerprint::secret_fingerprint(self.as_bytes())
    }
}

/// Errors raised while loading the token secret.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Neither the file nor the variable supplied a secret.
    #[error("failed to read token secret at {path} and {env} is unset: {source}")]
    SecretRead {
        path: PathBuf,
        env: &'static str,
        #[source]
        source: std::io::Error,
    },
    /// The configured secret is too short for release builds.
    #[error("token secret from {origin} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        origin: SecretSource,
        length: usize,
        min_len: usize,
    },
}

/// Load the token secret from environment-driven configuration.
///
/// # Examples
///
/// ```rust
/// use mockable::MockEnv;
/// use newsroom::inbound::http::token_config::{BuildMode, token_secret_from_env};
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "NEWSROOM_TOKEN_SECRET_FILE" => Some("/nonexistent/token_secret".to_owned()),
///     "NEWSROOM_TOKEN_SECRET" => Some("x".repeat(32)),
///     _ => None,
/// });
///
/// let secret = token_secret_from_env(&env, BuildMode::Release).expect("secret");
/// assert_eq!(secret.as_bytes().len(), 32);
/// ```
pub fn token_secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSecret, TokenConfigError> {
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;
    let path = PathBuf::from(
        env.string(SECRET_FILE_ENV)
            .unwrap_or_else(|| SECRET_DEFAULT_PATH.to_owned()),
    );

    match std::fs::read(&path) {
        Ok(bytes) => checked(Zeroizing::new(bytes), SecretSource::File(path), mode),
        Err(error) => {
            if let Some(value) = env.string(SECRET_ENV).map(Zeroizing::new) {
                let bytes = Zeroizing::new(value.as_bytes().to_vec());
                return checked(bytes, SecretSource::Environment, mode);
            }
            if mode.is_debug() || allow_ephemeral {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using ephemeral token secret; tokens will not survive a restart"
                );
                return Ok(ephemeral());
            }
            Err(TokenConfigError::SecretRead {
                path,
                env: SECRET_ENV,
                source: error,
            })
        }
    }
}

fn checked(
    bytes: Zeroizing<Vec<u8>>,
    source: SecretSource,
    mode: BuildMode,
) -> Result<TokenSecret, TokenConfigError> {
    let length = bytes.len();
    if length == 0 || (!mode.is_debug() && length < SECRET_MIN_LEN) {
        return Err(TokenConfigError::SecretTooShort {
            origin: source,
            length,
            min_len: SECRET_MIN_LEN,
        });
    }
    if length < SECRET_MIN_LEN {
        warn!(%source, length, "token secret shorter than recommended");
    }
    Ok(TokenSecret { bytes, source })
}

fn ephemeral() -> TokenSecret {
    let mut bytes = Zeroizing::new(vec![0_u8; EPHEMERAL_LEN]);
    OsRng.fill_bytes(bytes.as_mut_slice());
    TokenSecret {
        bytes,
        source: SecretSource::Ephemeral,
    }
}

fn allow_ephemeral_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, TokenConfigError> {
    let Some(value) = env.string(ALLOW_EPHEMERAL_ENV) else {
        return Ok(false);
    };
    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None if mode.is_debug() => {
            warn!(
                value = %value,
                "invalid NEWSROOM_ALLOW_EPHEMERAL_SECRET; defaulting to disabled"
            );
            Ok(false)
        }
        None => Err(TokenConfigError::InvalidEnv {
            name: ALLOW_EPHEMERAL_ENV,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
