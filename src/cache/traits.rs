// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use bytes::Bytes;

// Layer 3: Internal module imports
use super::error::CacheError;
use crate::util::CorrelationKey;

/// Contract for the Correlation Cache (C1): `put`, `get`, `delete`,
/// keyed by opaque [`CorrelationKey`] strings (§4.1).
///
/// Implementations may be in-memory or out-of-process; the broker itself
/// never uses this trait — only inbound components (C3) do, on the PALM
/// path. Access may be concurrent and must be linearisable per key.
#[async_trait]
pub trait CorrelationCache: Send + Sync {
    /// Store `bytes` under `key`, replacing any existing entry.
    async fn put(&self, key: CorrelationKey, bytes: Bytes) -> Result<(), CacheError>;

    /// Fetch the bytes stored under `key`.
    ///
    /// # Errors
    /// Returns [`CacheError::Miss`] if no entry exists for `key`.
    async fn get(&self, key: &CorrelationKey) -> Result<Bytes, CacheError>;

    /// Remove the entry stored under `key`, if any. Deleting a key that
    /// isn't present is not an error.
    async fn delete(&self, key: &CorrelationKey) -> Result<(), CacheError>;
}
