//! Durable key/value storage behind a small capability trait.
//!
//! The registry never talks to a concrete backend directly; it receives an
//! `Arc<dyn KvStore>` at construction. Writes are best-effort from the
//! caller's point of view: a failed `set` is reported so the caller can log
//! it, but nothing above the registry ever sees a storage error.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::StoreError;

/// Key/value persistence with `get`/`set`/`remove` semantics.
pub trait KvStore: Send + Sync {
    /// Read a value. Missing or unreadable keys are `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a key. Removing a missing key is not an error.
    fn remove(&self, key: &str);
}

/// Read and deserialize a JSON value.
///
/// Malformed content is logged and treated as absent.
pub fn get_json<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "ignoring malformed stored value");
            None
        }
    }
}

/// Serialize a value as JSON and write it.
pub fn set_json<T: Serialize + ?Sized>(
    store: &dyn KvStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}
