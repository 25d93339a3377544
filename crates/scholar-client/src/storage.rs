//! Client-local persistent key/value storage.
//!
//! Credentials are mirrored here so they survive a restart. Values are
//! plain strings; structured records are stored as JSON.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use scholar_common::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

pub fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub fn set_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::Unavailable(format!(
                "invalid storage key {key:?}"
            )));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;
        // Write-then-rename so a crash never leaves a truncated value.
        let tmp = self.dir.join(format!(".{key}.tmp"));
        write_private(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Stored values include the bearer token, so files are owner-only on Unix.
#[cfg(unix)]
fn write_private(path: &Path, value: &str) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies on create; a stale temp file keeps its old bits.
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(value.as_bytes())
}

#[cfg(not(unix))]
fn write_private(path: &Path, value: &str) -> std::io::Result<()> {
    std::fs::write(path, value)
}

/// In-process store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("scholar"));

        assert_eq!(store.get("auth_token").unwrap(), None);
        store.set("auth_token", "abc").unwrap();
        assert_eq!(store.get("auth_token").unwrap().as_deref(), Some("abc"));

        store.set("auth_token", "def").unwrap();
        assert_eq!(store.get("auth_token").unwrap().as_deref(), Some("def"));

        store.remove("auth_token").unwrap();
        assert_eq!(store.get("auth_token").unwrap(), None);
    }

    #[test]
    fn file_store_remove_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.remove("user").is_ok());
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.set("../escape", "x"),
            Err(StorageError::Unavailable(_))
        ));
        assert!(store.get("").is_err());
    }

    #[test]
    fn file_store_survives_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        FileStore::new(dir.path()).set("auth_token", "persisted").unwrap();
        let reopened = FileStore::new(dir.path());
        assert_eq!(
            reopened.get("auth_token").unwrap().as_deref(),
            Some("persisted")
        );
    }

    #[test]
    fn json_helpers() {
        let store = MemoryStore::new();
        set_json(&store, "numbers", &vec![1, 2, 3]).unwrap();
        let back: Option<Vec<u32>> = get_json(&store, "numbers").unwrap();
        assert_eq!(back, Some(vec![1, 2, 3]));

        store.set("broken", "{not json").unwrap();
        let err = get_json::<Vec<u32>>(&store, "broken").unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[cfg(unix)]
    #[test]
    fn stored_values_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        std::fs::write(dir.path().join(".auth_token.tmp"), "stale").unwrap();
        std::fs::set_permissions(
            dir.path().join(".auth_token.tmp"),
            std::fs::Permissions::from_mode(0o644),
        )
        .unwrap();

        store.set("auth_token", "secret").unwrap();

        let mode = std::fs::metadata(dir.path().join("auth_token"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o077, 0, "mode was {mode:o}");
        assert_eq!(store.get("auth_token").unwrap().as_deref(), Some("secret"));
    }
}
