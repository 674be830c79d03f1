//! Error types for cart storage.

use thiserror::Error;

/// Errors raised by a [`KeyValueStorage`](super::KeyValueStorage) backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The key contains characters the backend cannot store.
    #[error("invalid storage key {0:?}: use ASCII letters, digits, '-' or '_'")]
    InvalidKey(String),

    /// Reading or writing the backing file failed.
    #[error("IO error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}
