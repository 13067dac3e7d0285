//! Configuration for one Scatter Service instance (§6, §10.3).

use serde::{Deserialize, Serialize};

use super::error::ScatterError;

/// Validated configuration for a [`ScatterService`](super::ScatterService).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScatterConfig {
    /// Identity this service registers with the broker under.
    pub name: String,
    /// Number of inbound messages fanned out before the service terminates.
    pub max_messages: u64,
}

impl ScatterConfig {
    pub fn new(name: impl Into<String>, max_messages: u64) -> Self {
        Self {
            name: name.into(),
            max_messages,
        }
    }

    pub fn validate(&self) -> Result<(), ScatterError> {
        if self.name.trim().is_empty() {
            return Err(ScatterError::InvalidConfig("name must not be empty".to_string()));
        }
        if self.max_messages < 1 {
            return Err(ScatterError::InvalidConfig(
                "max_messages must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}
