//! Configuration for one inbound component instance (§6, §10.3).

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use super::error::InboundError;

/// Validated configuration for an [`InboundComponent`](super::InboundComponent).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundConfig {
    /// Identity this component registers with the broker under.
    pub name: String,
    /// Whether incoming messages are Client Envelopes (PALM) or opaque
    /// binary payloads.
    pub palm: bool,
    /// Number of messages processed before the component terminates.
    pub max_messages: u64,
    /// Whether to wait for and translate the broker's reply, or simply
    /// forward it unchanged (§4.3's `reply=false` variant).
    pub reply: bool,
}

impl InboundConfig {
    pub fn new(name: impl Into<String>, palm: bool, max_messages: u64) -> Self {
        Self {
            name: name.into(),
            palm,
            max_messages,
            reply: true,
        }
    }

    /// Build a `reply=false` variant of this configuration.
    pub fn without_reply(mut self) -> Self {
        self.reply = false;
        self
    }

    /// Validate the configuration: `name` must be non-empty and
    /// `max_messages` must be at least 1 (§6 Configuration).
    pub fn validate(&self) -> Result<(), InboundError> {
        if self.name.trim().is_empty() {
            return Err(InboundError::InvalidConfig("name must not be empty".to_string()));
        }
        if self.max_messages < 1 {
            return Err(InboundError::InvalidConfig(
                "max_messages must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config_passes_validation() {
        let config = InboundConfig::new("producer-1", true, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_name_fails_validation() {
        let config = InboundConfig::new("", true, 100);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_max_messages_fails_validation() {
        let config = InboundConfig::new("producer-1", true, 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_without_reply_sets_flag() {
        let config = InboundConfig::new("producer-1", false, 10).without_reply();
        assert!(!config.reply);
    }
}
