//! Top-level configuration for assembling a complete broker system.

// Layer 1: Standard library
// (none)

// Layer 2: Third-party
use serde::{Deserialize, Serialize};

// Layer 3: Internal
use crate::broker::BrokerConfig;

/// Default bounded capacity for the broker's shared inbound/outbound
/// channels when not overridden.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Default number of event-loop iterations the broker runs before
/// shutting down cleanly (§4.6 Termination). `u64::MAX` in effect means
/// "run until the channels close".
pub const DEFAULT_MAX_MESSAGES: u64 = u64::MAX;

/// Top-level configuration for one running system: the broker plus
/// whatever inbound, outbound, and scatter components are registered
/// against it. Each component still validates its own configuration
/// (§10.3); this struct only carries the settings shared across all of
/// them at assembly time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Configuration for the broker event loop this system wraps.
    pub broker: BrokerConfig,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            broker: BrokerConfig::new("broker", DEFAULT_CHANNEL_CAPACITY, DEFAULT_MAX_MESSAGES),
        }
    }
}

impl SystemConfig {
    /// Build a system configuration around an explicit broker configuration.
    pub fn new(broker: BrokerConfig) -> Self {
        Self { broker }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_documented_defaults() {
        let config = SystemConfig::default();
        assert_eq!(config.broker.channel_capacity, DEFAULT_CHANNEL_CAPACITY);
        assert_eq!(config.broker.max_messages, DEFAULT_MAX_MESSAGES);
    }

    #[test]
    fn test_new_wraps_explicit_broker_config() {
        let broker = BrokerConfig::new("custom", 8, 10);
        let config = SystemConfig::new(broker);
        assert_eq!(config.broker.name, "custom");
        assert_eq!(config.broker.channel_capacity, 8);
    }

    #[test]
    fn test_serialization_json() {
        let config = SystemConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SystemConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.broker.name, deserialized.broker.name);
    }

    #[test]
    fn test_config_clone() {
        let config1 = SystemConfig::default();
        let config2 = config1.clone();
        assert_eq!(config1.broker.name, config2.broker.name);
    }

    #[test]
    fn test_config_debug() {
        let config = SystemConfig::default();
        let debug = format!("{config:?}");
        assert!(debug.contains("SystemConfig"));
    }
}
