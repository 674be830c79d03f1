//! Durable key-value storage for cart sessions.
//!
//! The cart persists one JSON document under a fixed key, the same way a
//! browser client keeps it in local storage. Two backends are provided:
//!
//! - [`MemoryStorage`] - shared in-process map, for tests and embedders
//! - [`FileStorage`] - one file per key in a directory

mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// A string-keyed store of string values.
pub trait KeyValueStorage {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the key is invalid or the backend fails.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the key is invalid or the backend fails.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the key is invalid or the backend fails.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Returns `true` if `key` is safe to use as a file name on every platform.
pub(crate) fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
