//! Lock-free in-memory Correlation Cache backed by a concurrent map.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

// Layer 3: Internal module imports
use super::error::CacheError;
use super::traits::CorrelationCache;
use crate::util::CorrelationKey;

/// In-memory [`CorrelationCache`] implementation backed by [`DashMap`],
/// safe for concurrent access from many C3 instances (§5).
///
/// Cheap to clone: the map itself lives behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCorrelationCache {
    entries: Arc<DashMap<CorrelationKey, Bytes>>,
}

impl InMemoryCorrelationCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
        }
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the cache currently holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CorrelationCache for InMemoryCorrelationCache {
    async fn put(&self, key: CorrelationKey, bytes: Bytes) -> Result<(), CacheError> {
        self.entries.insert(key, bytes);
        Ok(())
    }

    async fn get(&self, key: &CorrelationKey) -> Result<Bytes, CacheError> {
        self.entries
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| CacheError::miss(key.as_str()))
    }

    async fn delete(&self, key: &CorrelationKey) -> Result<(), CacheError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get() {
        let cache = InMemoryCorrelationCache::new();
        let key = CorrelationKey::fresh();

        cache
            .put(key.clone(), Bytes::from_static(b"hello"))
            .await
            .unwrap();

        let fetched = cache.get(&key).await.unwrap();
        assert_eq!(fetched.as_ref(), b"hello");
    }

    #[tokio::test]
    async fn test_get_missing_key_errors() {
        let cache = InMemoryCorrelationCache::new();
        let key = CorrelationKey::fresh();

        let result = cache.get(&key).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().is_miss());
    }

    #[tokio::test]
    async fn test_delete_removes_entry() {
        let cache = InMemoryCorrelationCache::new();
        let key = CorrelationKey::fresh();

        cache
            .put(key.clone(), Bytes::from_static(b"hello"))
            .await
            .unwrap();
        cache.delete(&key).await.unwrap();

        assert!(cache.get(&key).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_missing_key_is_not_an_error() {
        let cache = InMemoryCorrelationCache::new();
        let key = CorrelationKey::fresh();

        assert!(cache.delete(&key).await.is_ok());
    }

    #[tokio::test]
    async fn test_clone_shares_storage() {
        let cache = InMemoryCorrelationCache::new();
        let clone = cache.clone();
        let key = CorrelationKey::fresh();

        cache
            .put(key.clone(), Bytes::from_static(b"shared"))
            .await
            .unwrap();

        let fetched = clone.get(&key).await.unwrap();
        assert_eq!(fetched.as_ref(), b"shared");
    }

    #[tokio::test]
    async fn test_len_and_is_empty() {
        let cache = InMemoryCorrelationCache::new();
        assert!(cache.is_empty());

        cache
            .put(CorrelationKey::fresh(), Bytes::from_static(b"x"))
            .await
            .unwrap();

        assert_eq!(cache.len(), 1);
        assert!(!cache.is_empty());
    }
}
