//! The token seam between the API client and persistence.
//!
//! The client never caches the token itself: it asks its [`TokenStore`] on
//! every request and clears it when the server answers 401.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::errors::AuthError;
use crate::storage::{clear_auth_storage, load_auth_storage, save_auth_storage};
use crate::types::{AuthStorage, Credentials};

/// Holds at most one set of credentials.
pub trait TokenStore: Send + Sync {
    /// Current credentials, if any.
    fn load(&self) -> Option<Credentials>;

    /// Replace the stored credentials.
    fn save(&self, credentials: &Credentials) -> Result<(), AuthError>;

    /// Forget the stored credentials. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), AuthError>;
}

/// Credentials persisted to an `auth.json` file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file location.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<Credentials> {
        load_auth_storage(&self.path).map(|storage| storage.credentials)
    }

    fn save(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let mut storage = AuthStorage::new(credentials.clone());
        save_auth_storage(&self.path, &mut storage)?;
        tracing::debug!(path = %self.path.display(), "saved credentials");
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        clear_auth_storage(&self.path)?;
        tracing::debug!(path = %self.path.display(), "cleared credentials");
        Ok(())
    }
}

/// Process-local credentials, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    inner: RwLock<Option<Credentials>>,
}

impl MemoryTokenStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with `credentials`.
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            inner: RwLock::new(Some(credentials)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<Credentials> {
        self.inner.read().clone()
    }

    fn save(&self, credentials: &Credentials) -> Result<(), AuthError> {
        *self.inner.write() = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self.inner.write() = None;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
