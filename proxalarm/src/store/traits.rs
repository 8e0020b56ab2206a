//! Durable key/value storage interface.
//!
//! The `KeyValueStore` trait is the only shared mutable resource between the
//! foreground tracker and background invocations. Values are strings, in the
//! same shape a mobile platform's async storage would hold them.
//!
//! # Dyn Compatibility
//!
//! Async methods return [`BoxFuture`] so stores can be used as
//! `Arc<dyn KeyValueStore>` and swapped for in-memory fakes in tests.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error on the underlying storage.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing data could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A stored value exists but cannot be interpreted.
    #[error("Corrupt value for '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    /// The operation did not complete within the allowed time.
    #[error("Store operation timed out after {0:?}")]
    Timeout(Duration),

    /// The store refused the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// String key/value storage that survives process restarts.
///
/// Implementations must make every successful `set` visible to a reader in
/// another process. No cross-process locking is expected.
pub trait KeyValueStore: Send + Sync {
    /// Retrieve a value by key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` if the key exists
    /// - `Ok(None)` if the key is not set
    /// - `Err(_)` if the storage could not be read
    fn get(&self, key: &str) -> BoxFuture<'_, Result<Option<String>, StoreError>>;

    /// Store a value, replacing any previous one.
    fn set(&self, key: &str, value: String) -> BoxFuture<'_, Result<(), StoreError>>;

    /// Remove a key. Returns whether it existed.
    fn remove(&self, key: &str) -> BoxFuture<'_, Result<bool, StoreError>>;

    /// Store several values.
    ///
    /// The default writes entries one at a time in order, so a reader may
    /// observe a prefix of them. Stores that can commit a batch in a single
    /// write should override this.
    fn set_many(&self, entries: Vec<(String, String)>) -> BoxFuture<'_, Result<(), StoreError>> {
        Box::pin(async move {
            for (key, value) in entries {
                self.set(&key, value).await?;
            }
            Ok(())
        })
    }
}
