//! Session persistence.
//!
//! A [`SessionStore`] owns the persisted session record and the backend
//! bearer token. The medium behind it is a [`KeyValueStore`].

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::StoreError;
use crate::session::{Session, SessionRecord};

/// Key holding the serialized session.
pub const SESSION_KEY: &str = "sui-zklogin-state";

/// Key holding the backend bearer token.
pub const BACKEND_TOKEN_KEY: &str = "backend-jwt";

/// String key/value persistence medium.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

// ============================================================================
// File-backed store
// ============================================================================

/// One file per key under a base directory.
///
/// Writes go to a temp file first and are moved into place with an atomic
/// rename.
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.key_path(key);
        let temp_path = path.with_extension("json.tmp");

        fs::write(&temp_path, value)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved '{}' to {}", key, path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => {
                tracing::debug!("Removed '{}'", key);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// Process-local store. Clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still structurally valid
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries().remove(key);
        Ok(())
    }
}

// ============================================================================
// Session store
// ============================================================================

/// Single active session per client instance.
pub struct SessionStore<S> {
    medium: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(medium: S) -> Self {
        Self { medium }
    }

    pub fn medium(&self) -> &S {
        &self.medium
    }

    /// Last persisted session, or `None`.
    ///
    /// A record that cannot be read back is removed. Failures are logged and
    /// never surfaced.
    pub fn load(&self) -> Option<Session> {
        match self.try_load() {
            Ok(session) => session,
            Err(e @ StoreError::Corrupt { .. }) => {
                tracing::warn!("Failed to restore zkLogin state: {}", e);
                if let Err(e) = self.medium.remove(SESSION_KEY) {
                    tracing::warn!("Failed to remove corrupt zkLogin state: {}", e);
                }
                None
            }
            Err(e) => {
                tracing::warn!("Failed to read zkLogin state: {}", e);
                None
            }
        }
    }

    /// Read the persisted session without clearing anything on failure.
    pub fn try_load(&self) -> Result<Option<Session>, StoreError> {
        let Some(raw) = self.medium.get(SESSION_KEY)? else {
            return Ok(None);
        };

        serde_json::from_str::<SessionRecord>(&raw)
            .map_err(|e| e.to_string())
            .and_then(Session::from_record)
            .map(Some)
            .map_err(|reason| StoreError::Corrupt {
                key: SESSION_KEY.to_string(),
                reason,
            })
    }

    /// Overwrite the persisted session. Sessions without a key are not stored.
    pub fn save(&self, session: &Session) -> Result<(), StoreError> {
        let Some(record) = session.to_record() else {
            return Ok(());
        };
        let json = serde_json::to_string(&record)?;
        self.medium.set(SESSION_KEY, &json)
    }

    /// Erase the session and the backend token.
    pub fn clear(&self) -> Result<(), StoreError> {
        let session = self.medium.remove(SESSION_KEY);
        let token = self.medium.remove(BACKEND_TOKEN_KEY);
        session.and(token)
    }

    pub fn save_backend_token(&self, token: &str) -> Result<(), StoreError> {
        self.medium.set(BACKEND_TOKEN_KEY, token)
    }

    pub fn backend_token(&self) -> Option<String> {
        match self.medium.get(BACKEND_TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!("Failed to read backend token: {}", e);
                None
            }
        }
    }
}
