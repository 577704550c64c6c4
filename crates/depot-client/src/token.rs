//! # Auth Token Access
//!
//! The bearer token is an opaque string produced by login. It is read from
//! persistent storage first and from session storage second.
//!
//! ## Token Lookup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  TokenAccessor::token()                                                │
//! │       │                                                                 │
//! │       ├── persistent store (token file)  ── non-empty? ──► Some(token)  │
//! │       │                                                                 │
//! │       ├── session store (env var)        ── non-empty? ──► Some(token)  │
//! │       │                                                                 │
//! │       └── None  ──► caller redirects to Login, sends nothing            │
//! │                                                                         │
//! │  Presence only: the token is never decoded, checked for expiry, or     │
//! │  refreshed. An empty string counts as absent.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};

// =============================================================================
// Token Store Trait
// =============================================================================

/// A place a token can be kept.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> ClientResult<Option<String>>;

    fn save(&self, token: &str) -> ClientResult<()>;

    fn clear(&self) -> ClientResult<()>;
}

fn non_empty(token: String) -> Option<String> {
    let token = token.trim().to_string();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

// =============================================================================
// File Store (persistent)
// =============================================================================

/// Token kept in a file across runs.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> ClientResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(non_empty(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ClientError::TokenStorage(format!("{}: {}", self.path.display(), e))),
        }
    }

    fn save(&self, token: &str) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ClientError::TokenStorage(e.to_string()))?;
        }
        fs::write(&self.path, token).map_err(|e| ClientError::TokenStorage(e.to_string()))?;
        info!(path = ?self.path, "Auth token persisted");
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = ?self.path, "Auth token removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::TokenStorage(e.to_string())),
        }
    }
}

// =============================================================================
// Env Store (session)
// =============================================================================

/// Read-only token taken from an environment variable for this process.
#[derive(Debug, Clone)]
pub struct EnvTokenStore {
    var: String,
}

impl EnvTokenStore {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl TokenStore for EnvTokenStore {
    fn load(&self) -> ClientResult<Option<String>> {
        Ok(std::env::var(&self.var).ok().and_then(non_empty))
    }

    fn save(&self, _token: &str) -> ClientResult<()> {
        Err(ClientError::TokenStorage(format!(
            "session token in {} is read-only",
            self.var
        )))
    }

    fn clear(&self) -> ClientResult<()> {
        debug!(var = %self.var, "Session token is owned by the environment; nothing to clear");
        Ok(())
    }
}

// =============================================================================
// Memory Store
// =============================================================================

/// In-process token, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> ClientResult<Option<String>> {
        let guard = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.clone().and_then(non_empty))
    }

    fn save(&self, token: &str) -> ClientResult<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

// =============================================================================
// Token Accessor
// =============================================================================

/// Reads the current token from persistent storage, then session storage.
#[derive(Clone)]
pub struct TokenAccessor {
    persistent: Arc<dyn TokenStore>,
    session: Arc<dyn TokenStore>,
}

impl TokenAccessor {
    pub fn new(persistent: Arc<dyn TokenStore>, session: Arc<dyn TokenStore>) -> Self {
        Self { persistent, session }
    }

    /// A token file at `path` plus the `env_var` session token.
    pub fn from_paths(path: impl Into<PathBuf>, env_var: impl Into<String>) -> Self {
        Self::new(
            Arc::new(FileTokenStore::new(path)),
            Arc::new(EnvTokenStore::new(env_var)),
        )
    }

    /// Purely in-memory stores; nothing touches disk or the environment.
    pub fn in_memory(token: Option<&str>) -> Self {
        let persistent = match token {
            Some(token) => MemoryTokenStore::with_token(token),
            None => MemoryTokenStore::new(),
        };
        Self::new(Arc::new(persistent), Arc::new(MemoryTokenStore::new()))
    }

    /// The current token, or `None` when neither store has one.
    ///
    /// A store that fails to read is logged and treated as empty.
    pub fn token(&self) -> Option<String> {
        for (source, store) in [("persistent", &self.persistent), ("session", &self.session)] {
            match store.load() {
                Ok(Some(token)) => {
                    debug!(source, "Auth token found");
                    return Some(token);
                }
                Ok(None) => {}
                Err(e) => warn!(source, error = %e, "Failed to read auth token"),
            }
        }
        None
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    /// The token, or `MissingToken`.
    pub fn require(&self) -> ClientResult<String> {
        self.token().ok_or(ClientError::MissingToken)
    }

    /// Persists a freshly issued token.
    pub fn store(&self, token: &str) -> ClientResult<()> {
        self.persistent.save(token)
    }

    /// Removes the persisted token (logout). The session token, if any, is
    /// left to its owner.
    pub fn clear(&self) -> ClientResult<()> {
        self.persistent.clear()
    }
}

impl std::fmt::Debug for TokenAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAccessor")
            .field("has_token", &self.has_token())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistent_wins_over_session() {
        let accessor = TokenAccessor::new(
            Arc::new(MemoryTokenStore::with_token("persisted")),
            Arc::new(MemoryTokenStore::with_token("session")),
        );
        assert_eq!(accessor.token().as_deref(), Some("persisted"));
    }

    #[test]
    fn test_falls_back_to_session() {
        let accessor = TokenAccessor::new(
            Arc::new(MemoryTokenStore::new()),
            Arc::new(MemoryTokenStore::with_token("session")),
        );
        assert_eq!(accessor.token().as_deref(), Some("session"));
    }

    #[test]
    fn test_empty_token_counts_as_absent() {
        let accessor = TokenAccessor::in_memory(Some("  "));
        assert!(!accessor.has_token());
        assert!(matches!(accessor.require(), Err(ClientError::MissingToken)));
    }

    #[test]
    fn test_file_store_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("session").join("auth_token"));

        assert_eq!(store.load().unwrap(), None);
        store.save("abc.def").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("abc.def"));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        // clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_logout_clears_persistent_only() {
        let session = Arc::new(MemoryTokenStore::with_token("session"));
        let accessor = TokenAccessor::new(Arc::new(MemoryTokenStore::with_token("persisted")), session);
        accessor.clear().unwrap();
        assert_eq!(accessor.token().as_deref(), Some("session"));
    }

    #[test]
    fn test_env_store_is_read_only() {
        let store = EnvTokenStore::new("DEPOT_TEST_TOKEN_THAT_IS_NEVER_SET");
        assert_eq!(store.load().unwrap(), None);
        assert!(store.save("x").is_err());
        assert!(store.clear().is_ok());
    }
}
