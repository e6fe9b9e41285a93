//! Bearer token persistence.
//!
//! The web front end keeps its token in browser storage; here the same role
//! is played by a [`SessionStore`]. [`FileSessionStore`] survives restarts,
//! [`MemorySessionStore`] does not.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use cap_std::ambient_authority;
use cap_std::fs::Dir;
use thiserror::Error;

/// Failures reading or writing a stored token.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session directory could not be opened.
    #[error("failed to open session directory {path}: {source}")]
    OpenDir {
        /// Directory that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The token file could not be read, written or removed.
    #[error("failed to access session file {file}: {source}")]
    Io {
        /// File name inside the session directory.
        file: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// Where the current bearer token lives between calls.
pub trait SessionStore: Send + Sync {
    /// The stored token, if any.
    fn token(&self) -> Result<Option<String>, SessionError>;
    /// Replace the stored token.
    fn store(&self, token: &str) -> Result<(), SessionError>;
    /// Forget the token. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), SessionError>;
}

/// Keeps the token for the life of the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Result<Option<String>, SessionError> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn store(&self, token: &str) -> Result<(), SessionError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Token stored as a single file inside a capability-scoped directory.
#[derive(Debug)]
pub struct FileSessionStore {
    dir: Dir,
    file: String,
}

impl FileSessionStore {
    /// Open `directory` and keep the token in `file` within it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::OpenDir`] when the directory cannot be opened.
    pub fn open(directory: &Path, file: impl Into<String>) -> Result<Self, SessionError> {
        let dir = Dir::open_ambient_dir(directory, ambient_authority()).map_err(|source| {
            SessionError::OpenDir {
                path: directory.to_path_buf(),
                source,
            }
        })?;
        Ok(Self {
            dir,
            file: file.into(),
        })
    }

    fn io_error(&self, source: io::Error) -> SessionError {
        SessionError::Io {
            file: self.file.clone(),
            source,
        }
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Result<Option<String>, SessionError> {
        match self.dir.read_to_string(&self.file) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_owned()))
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(self.io_error(error)),
        }
    }

    fn store(&self, token: &str) -> Result<(), SessionError> {
        self.dir
            .write(&self.file, token)
            .map_err(|error| self.io_error(error))
    }

    fn clear(&self) -> Result<(), SessionError> {
        match self.dir.remove_file(&self.file) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(self.io_error(error)),
        }
    }
}
