//! Session token store
//!
//! Single source of truth for "is the user authenticated". The token is opaque:
//! it is persisted to app-private storage on login, read before every
//! authenticated request and destroyed on logout or on a 401.

use std::path::PathBuf;
use std::sync::Mutex;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::StorageError;

mod token;

pub use token::{jwt_expiry, mask, resolve_token};

/// Durable storage for the session token.
pub trait TokenBackend: Send + Sync {
    /// Replace any stored token with `token`.
    fn store(&self, token: &str) -> std::result::Result<(), StorageError>;

    /// Load the stored token, if any.
    fn load(&self) -> std::result::Result<Option<String>, StorageError>;

    /// Remove the stored token. Removing nothing is not an error.
    fn remove(&self) -> std::result::Result<(), StorageError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    token: String,
}

/// Token persisted as YAML in a 0600 file next to the config.
pub struct FileTokenBackend {
    path: PathBuf,
}

impl FileTokenBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TokenBackend for FileTokenBackend {
    fn store(&self, token: &str) -> std::result::Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_yaml::to_string(&SessionFile {
            token: token.to_string(),
        })
        .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        // Write to a sibling then rename so readers never see a partial file.
        let tmp = self.path.with_extension("yaml.tmp");
        std::fs::write(&tmp, contents)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&tmp)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&tmp, perms)?;
        }

        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn load(&self) -> std::result::Result<Option<String>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let file: SessionFile =
            serde_yaml::from_str(&contents).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        if file.token.is_empty() {
            return Ok(None);
        }
        Ok(Some(file.token))
    }

    fn remove(&self) -> std::result::Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Process-local backend, used for `--ephemeral` sessions and tests.
#[derive(Default)]
pub struct MemoryTokenBackend {
    token: Mutex<Option<String>>,
}

impl TokenBackend for MemoryTokenBackend {
    fn store(&self, token: &str) -> std::result::Result<(), StorageError> {
        let mut slot = self
            .token
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn load(&self) -> std::result::Result<Option<String>, StorageError> {
        let slot = self
            .token
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(slot.clone())
    }

    fn remove(&self) -> std::result::Result<(), StorageError> {
        let mut slot = self
            .token
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        *slot = None;
        Ok(())
    }
}

/// Session token store shared by every API call.
///
/// Holds at most one live token. Writes replace the in-memory value first, so a
/// failing backend degrades to a session that lasts for this process only.
pub struct SessionStore {
    backend: Box<dyn TokenBackend>,
    current: RwLock<Option<String>>,
}

impl SessionStore {
    pub fn new(backend: Box<dyn TokenBackend>) -> Self {
        Self {
            backend,
            current: RwLock::new(None),
        }
    }

    /// Store backed by `session.yaml` at `path`
    pub fn with_file(path: PathBuf) -> Self {
        Self::new(Box::new(FileTokenBackend::new(path)))
    }

    /// Store that never touches disk
    pub fn in_memory() -> Self {
        Self::new(Box::<MemoryTokenBackend>::default())
    }

    /// Persist `token`, replacing any prior value. Storage failures are logged
    /// and swallowed; the token stays usable in memory.
    pub async fn save(&self, token: &str) {
        *self.current.write().await = Some(token.to_string());

        match self.backend.store(token) {
            Ok(()) => debug!("Session token saved ({})", mask(token)),
            Err(e) => warn!("Could not persist session token, keeping it in memory: {}", e),
        }
    }

    /// Current token, or `None` when unauthenticated. Never fails.
    pub async fn read(&self) -> Option<String> {
        if let Some(token) = self.current.read().await.clone() {
            return Some(token);
        }

        match self.backend.load() {
            Ok(Some(token)) => {
                *self.current.write().await = Some(token.clone());
                Some(token)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Could not read session token: {}", e);
                None
            }
        }
    }

    /// Destroy the token. Clearing an empty store is a no-op.
    pub async fn clear(&self) {
        *self.current.write().await = None;

        match self.backend.remove() {
            Ok(()) => debug!("Session token cleared"),
            Err(e) => warn!("Could not remove stored session token: {}", e),
        }
    }

    /// Whether a token is present
    pub async fn is_authenticated(&self) -> bool {
        self.read().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    struct BrokenBackend;

    impl TokenBackend for BrokenBackend {
        fn store(&self, _token: &str) -> std::result::Result<(), StorageError> {
            Err(StorageError::Unavailable("keychain locked".to_string()))
        }
        fn load(&self) -> std::result::Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("keychain locked".to_string()))
        }
        fn remove(&self) -> std::result::Result<(), StorageError> {
            Err(StorageError::Unavailable("keychain locked".to_string()))
        }
    }

    #[tokio::test]
    async fn test_save_read_clear() {
        let store = SessionStore::in_memory();
        assert_eq!(store.read().await, None);

        store.save("tok-1").await;
        assert_eq!(store.read().await.as_deref(), Some("tok-1"));

        store.save("tok-2").await;
        assert_eq!(store.read().await.as_deref(), Some("tok-2"));

        store.clear().await;
        assert_eq!(store.read().await, None);
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let store = SessionStore::in_memory();
        store.clear().await;
        store.clear().await;
        assert!(!store.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_broken_storage_keeps_token_in_memory() {
        let store = SessionStore::new(Box::new(BrokenBackend));

        store.save("tok").await;
        assert_eq!(store.read().await.as_deref(), Some("tok"));

        store.clear().await;
        assert_eq!(store.read().await, None);
    }

    #[tokio::test]
    async fn test_file_backend_survives_new_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.yaml");

        SessionStore::with_file(path.clone()).save("persisted").await;

        let reopened = SessionStore::with_file(path.clone());
        assert_eq!(reopened.read().await.as_deref(), Some("persisted"));

        reopened.clear().await;
        assert!(!path.exists());
        assert_eq!(SessionStore::with_file(path).read().await, None);
    }

    #[tokio::test]
    async fn test_corrupt_session_file_reads_as_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.yaml");
        std::fs::write(&path, "token: [unterminated").unwrap();

        let store = SessionStore::with_file(path);
        assert_eq!(store.read().await, None);
    }

    #[test]
    fn test_file_backend_remove_missing_file() {
        let dir = tempdir().unwrap();
        let backend = FileTokenBackend::new(dir.path().join("absent.yaml"));
        assert!(backend.remove().is_ok());
        assert_eq!(backend.load().unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_backend_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("session.yaml");
        let backend = FileTokenBackend::new(path.clone());
        backend.store("secret").unwrap();

        let mode = std::fs::metadata(&path)
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
