//! Correlation Cache error types following the crate's canonical error-struct pattern.

use thiserror::Error;

/// Errors that can occur accessing the Correlation Cache (§4.1).
#[derive(Debug, Error)]
pub enum CacheError {
    /// No entry was found for the requested key.
    #[error("cache miss for key {key}")]
    Miss {
        /// The key that was looked up.
        key: String,
    },
}

impl CacheError {
    /// Build a [`CacheError::Miss`] naming the key.
    pub fn miss(key: impl Into<String>) -> Self {
        Self::Miss { key: key.into() }
    }

    /// True if this is a cache-miss error.
    pub fn is_miss(&self) -> bool {
        matches!(self, Self::Miss { .. })
    }
}
