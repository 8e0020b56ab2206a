//! In-memory key/value store.
//!
//! Backed by a `DashMap` so clones of the surrounding `Arc` can be shared
//! between a foreground engine and simulated background invocations inside
//! one process. Nothing survives the process, which makes it the store of
//! choice for tests and dry runs.

use dashmap::DashMap;

use super::traits::{BoxFuture, KeyValueStore, StoreError};

/// In-memory [`KeyValueStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no keys are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Synchronous read, for assertions.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.value().clone())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> BoxFuture<'_, Result<Option<String>, StoreError>> {
        let key = key.to_string();
        Box::pin(async move { Ok(self.peek(&key)) })
    }

    fn set(&self, key: &str, value: String) -> BoxFuture<'_, Result<(), StoreError>> {
        let key = key.to_string();
        Box::pin(async move {
            self.entries.insert(key, value);
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> BoxFuture<'_, Result<bool, StoreError>> {
        let key = key.to_string();
        Box::pin(async move { Ok(self.entries.remove(&key).is_some()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_set_and_get() {
        let store = MemoryStore::new();

        store.set("key1", "value".to_string()).await.unwrap();

        let value = store.get("key1").await.unwrap();
        assert_eq!(value.as_deref(), Some("value"));
    }

    #[tokio::test]
    async fn test_memory_store_get_missing() {
        let store = MemoryStore::new();
        assert!(store.get("nonexistent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_replace_existing() {
        let store = MemoryStore::new();

        store.set("key1", "a".to_string()).await.unwrap();
        store.set("key1", "b".to_string()).await.unwrap();

        assert_eq!(store.peek("key1").as_deref(), Some("b"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_memory_store_remove() {
        let store = MemoryStore::new();
        store.set("key1", "a".to_string()).await.unwrap();

        assert!(store.remove("key1").await.unwrap());
        assert!(!store.remove("key1").await.unwrap());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_memory_store_set_many_writes_in_order() {
        let store = MemoryStore::new();

        store
            .set_many(vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
                ("a".to_string(), "3".to_string()),
            ])
            .await
            .unwrap();

        assert_eq!(store.peek("a").as_deref(), Some("3"));
        assert_eq!(store.peek("b").as_deref(), Some("2"));
    }
}
