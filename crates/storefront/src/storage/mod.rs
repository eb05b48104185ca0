//! Durable key-value storage for client-side state.
//!
//! The storefront persists exactly one document (the user profile) under a
//! fixed key, so the contract is deliberately small: string keys, string
//! values, async get/set/remove. Two backends are provided:
//!
//! - [`MemoryStore`] - process-local, used by tests and throwaway sessions
//! - [`JsonFileStore`] - a single JSON file that survives restarts

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing medium holds something that is not a key-value document.
    #[error("storage is corrupt: {0}")]
    Corrupt(String),

    /// The backend rejected the operation for another reason.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Async string-keyed storage over a single namespace.
///
/// Every call is independent and all-or-nothing: a failed `set` leaves the
/// previous value in place.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: String)
    -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Remove the value stored under `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

impl<S: KeyValueStore> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send {
        (**self).get(key)
    }

    fn set(
        &self,
        key: &str,
        value: String,
    ) -> impl Future<Output = Result<(), StorageError>> + Send {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send {
        (**self).remove(key)
    }
}
