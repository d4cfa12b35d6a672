//! JSON-file backed user store

use super::{UserRecord, UserStore};
use crate::error::{HandleScoutError, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Whole-map JSON persistence with an in-memory cache.
///
/// Single-process only: every save rewrites the file from the cache, so two
/// processes sharing one file will clobber each other.
pub struct JsonFileStore {
    path: PathBuf,
    cache: RwLock<HashMap<u64, UserRecord>>,
}

impl JsonFileStore {
    /// Open a store at `path`. A missing file is an empty store; a corrupt
    /// file is logged and treated as empty rather than refusing to start.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cache = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(map) => map,
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "Error decoding user data file");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Self {
            path,
            cache: RwLock::new(cache),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, map: &HashMap<u64, UserRecord>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    HandleScoutError::store(e.to_string(), Some(parent.display().to_string()))
                })?;
            }
        }

        let content = serde_json::to_string_pretty(map)
            .map_err(|e| HandleScoutError::store(e.to_string(), None))?;

        std::fs::write(&self.path, content).map_err(|e| {
            HandleScoutError::store(e.to_string(), Some(self.path.display().to_string()))
        })
    }
}

impl UserStore for JsonFileStore {
    fn load(&self, user_id: u64) -> Result<Option<UserRecord>> {
        Ok(self.cache.read().get(&user_id).cloned())
    }

    fn save(&self, user_id: u64, record: &UserRecord) -> Result<()> {
        let mut cache = self.cache.write();
        cache.insert(user_id, record.clone());
        self.persist(&cache)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::PendingInput;
    use crate::types::Platform;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("nope.json"));
        assert!(store.load(1).unwrap().is_none());
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user_data.json");

        let store = JsonFileStore::open(&path);
        let mut record = UserRecord::default();
        record.email = Some("alice@example.com".to_string());
        record.phone = Some("5551234".to_string());
        record
            .tokens
            .insert(Platform::TikTok, "secret-token".to_string());
        record.pending = PendingInput::Token(Platform::Instagram);
        store.save(42, &record).unwrap();

        // reopen from disk
        let reopened = JsonFileStore::open(&path);
        let loaded = reopened.load(42).unwrap().unwrap();
        assert_eq!(loaded.email.as_deref(), Some("alice@example.com"));
        assert_eq!(
            loaded.tokens.get(&Platform::TikTok).map(String::as_str),
            Some("secret-token")
        );
        assert_eq!(loaded.pending, PendingInput::Token(Platform::Instagram));
        assert!(reopened.load(7).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user_data.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::open(&path);
        assert!(store.load(1).unwrap().is_none());

        // saving still works and replaces the corrupt content
        store.save(1, &UserRecord::default()).unwrap();
        let reopened = JsonFileStore::open(&path);
        assert!(reopened.load(1).unwrap().is_some());
    }
}
