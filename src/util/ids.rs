// Layer 1: Standard library imports
use std::fmt::{self, Display};

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Layer 3: Internal module imports
// (none)

/// Sentinel key carried by a worker's first envelope, meaning "I am
/// available". Never returned by [`CorrelationKey::fresh`].
pub const READY_KEY: &str = "0";

/// Opaque correlation identifier labelling one in-flight request/response
/// pair between an inbound producer and the broker.
///
/// Rendered as text (a UUID) per the wire format in §4.2 / [`crate::codec`];
/// the broker treats it as an uninterpreted string and never parses it.
///
/// # Example
/// ```rust
/// use palm_broker::util::CorrelationKey;
///
/// let a = CorrelationKey::fresh();
/// let b = CorrelationKey::fresh();
/// assert_ne!(a, b);
/// assert!(!CorrelationKey::ready().is_fresh_value());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationKey(String);

impl CorrelationKey {
    /// Generate a fresh, globally unique correlation key (128-bit random,
    /// rendered as text).
    pub fn fresh() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The reserved "ready"/availability sentinel key (§9 open question a).
    pub fn ready() -> Self {
        Self(READY_KEY.to_string())
    }

    /// Wrap an already-parsed key string, e.g. one decoded off the wire.
    pub fn from_string(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the key as a plain string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True unless this is the reserved readiness sentinel.
    pub fn is_fresh_value(&self) -> bool {
        self.0 != READY_KEY
    }
}

impl Display for CorrelationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CorrelationKey> for String {
    fn from(key: CorrelationKey) -> Self {
        key.0
    }
}

/// Identity of a component connected to one of the broker's two endpoints
/// (inbound producer or outbound worker).
///
/// The identity must be observable by the broker on every receive, the
/// in-process analogue of a ROUTER socket's sender identity (§6).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentId(String);

impl ComponentId {
    /// Name a component by its registered identity string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the identity as a plain string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ComponentId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}
