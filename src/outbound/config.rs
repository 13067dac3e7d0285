//! Configuration for one outbound worker instance (§6, §10.3).

use serde::{Deserialize, Serialize};

use super::error::OutboundError;

/// Validated configuration for an [`OutboundComponent`](super::OutboundComponent).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundConfig {
    /// Identity this worker registers with the broker under.
    pub name: String,
    /// Number of dispatches handled before the worker terminates.
    pub max_messages: u64,
}

impl OutboundConfig {
    pub fn new(name: impl Into<String>, max_messages: u64) -> Self {
        Self {
            name: name.into(),
            max_messages,
        }
    }

    pub fn validate(&self) -> Result<(), OutboundError> {
        if self.name.trim().is_empty() {
            return Err(OutboundError::InvalidConfig("name must not be empty".to_string()));
        }
        if self.max_messages < 1 {
            return Err(OutboundError::InvalidConfig(
                "max_messages must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}
