//! File-backed credential store: one file per key under a private directory.
//!
//! This is the default store on platforms without a usable keychain. Values
//! are opaque strings, written whole, so a single-key write is atomic enough
//! for our purposes (the bootstrapper never depends on cross-key atomicity).

use std::path::{Path, PathBuf};

use crate::store::{CredentialStore, StoreError};

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| StoreError::Write {
            key: dir.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Store location, for diagnostics.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl CredentialStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| StoreError::Read {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::write(self.key_path(key), value).map_err(|e| StoreError::Write {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(());
        }
        std::fs::remove_file(&path).map_err(|e| StoreError::Remove {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    fn clear(&self) -> Result<(), StoreError> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| StoreError::Clear {
            reason: e.to_string(),
        })?;
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::Clear {
                reason: e.to_string(),
            })?;
            if entry.path().is_file() {
                std::fs::remove_file(entry.path()).map_err(|e| StoreError::Clear {
                    reason: e.to_string(),
                })?;
            }
        }
        Ok(())
    }
}
