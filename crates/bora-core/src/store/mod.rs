//! Durable key-value persistence for tokens and the cached user profile.
//!
//! The store is deliberately dumb: per-key reads and writes are atomic, but
//! there is no cross-key transaction. The "access and refresh token are both
//! present or both absent" invariant is enforced by the bootstrapper's write
//! ordering, not here.

use thiserror::Error;

pub mod file;
pub mod keychain;
pub mod memory;

pub use file::FileStore;
pub use keychain::KeyringStore;
pub use memory::MemoryStore;

/// Short-lived credential authorizing API calls.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Longer-lived credential used to mint a new access token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Cached user profile, stored as a JSON string.
pub const USER_KEY: &str = "user";

/// All keys the session core persists. Used by stores that cannot
/// enumerate their own entries (the OS keychain).
pub const SESSION_KEYS: [&str; 3] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY];

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read `{key}`: {reason}")]
    Read { key: String, reason: String },

    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },

    #[error("failed to remove `{key}`: {reason}")]
    Remove { key: String, reason: String },

    #[error("failed to clear store: {reason}")]
    Clear { reason: String },
}

/// Durable key-value storage for session material.
///
/// Reads and writes are synchronous; every backing store here (files, OS
/// keychain, memory) completes without blocking long enough to matter.
pub trait CredentialStore: Send + Sync {
    /// Fetch the value for `key`, `None` if absent. Absence is not an error.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Delete every session key.
    fn clear(&self) -> Result<(), StoreError>;
}
