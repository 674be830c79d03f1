//! Saving and restoring cart sessions.
//!
//! Writes happen in a [`CartSubscriber`] so the transition function never
//! touches storage. Reads happen once, when the store is opened.

use crate::session::CartSession;
use crate::storage::KeyValueStorage;
use crate::store::{CartChange, CartSubscriber};

/// Storage key the cart is saved under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "restaurant_cart";

/// Load the session saved under `key`.
///
/// Returns an empty session if nothing is stored, the backend fails, the JSON
/// is malformed or the decoded session breaks an invariant. Problems are
/// logged and never returned.
#[must_use]
pub fn restore_session<S>(storage: &S, key: &str) -> CartSession
where
    S: KeyValueStorage + ?Sized,
{
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(key, "No saved cart, starting empty");
            return CartSession::new();
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read saved cart, starting empty");
            return CartSession::new();
        }
    };

    let session: CartSession = match serde_json::from_str(&raw) {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding malformed saved cart");
            return CartSession::new();
        }
    };

    if let Err(e) = session.validate() {
        tracing::warn!(key, error = %e, "Discarding invalid saved cart");
        return CartSession::new();
    }

    tracing::debug!(key, entries = session.len(), "Restored saved cart");
    session
}

/// Serialize `session` and store it under `key`.
///
/// # Errors
///
/// Returns [`PersistError`] if serialization or the storage write fails.
pub fn save_session<S>(storage: &mut S, key: &str, session: &CartSession) -> Result<(), PersistError>
where
    S: KeyValueStorage + ?Sized,
{
    let json = serde_json::to_string(session)?;
    storage.set(key, &json)?;
    Ok(())
}

/// Errors from [`save_session`].
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to serialize cart: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write cart: {0}")]
    Storage(#[from] crate::storage::StorageError),
}

/// Subscriber that saves the full session after every action.
///
/// Write failures are logged and otherwise ignored; the in-memory session
/// stays authoritative.
#[derive(Debug)]
pub struct PersistOnChange<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> PersistOnChange<S> {
    #[must_use]
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<S: KeyValueStorage> CartSubscriber for PersistOnChange<S> {
    fn on_change(&mut self, change: &CartChange<'_>) {
        if let Err(e) = save_session(&mut self.storage, &self.key, change.session) {
            tracing::error!(
                key = %self.key,
                action = change.action.kind(),
                error = %e,
                "Failed to save cart"
            );
        }
    }
}
