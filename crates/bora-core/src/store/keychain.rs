//! OS keychain-backed credential store via the `keyring` crate.
//!
//! Each session key maps to one keychain entry under the app's service name.
//! The keychain cannot enumerate entries, so `clear` walks the known keys.

use keyring::Entry;

use crate::store::{CredentialStore, StoreError, SESSION_KEYS};

const SERVICE_NAME: &str = "bora";

pub struct KeyringStore {
    service: &'static str,
}

impl KeyringStore {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME,
        }
    }

    fn entry(&self, key: &str) -> Result<Entry, StoreError> {
        Entry::new(self.service, key).map_err(|e| StoreError::Read {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for KeyringStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StoreError::Read {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entry(key)?
            .set_password(value)
            .map_err(|e| StoreError::Write {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(StoreError::Remove {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        for key in SESSION_KEYS {
            self.remove(key).map_err(|e| StoreError::Clear {
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }
}
