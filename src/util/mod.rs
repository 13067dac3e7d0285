//! Small, dependency-free helper types shared across the crate.

pub mod ids;
pub mod serde_helpers;

pub use ids::{ComponentId, CorrelationKey, READY_KEY};
pub use serde_helpers::duration_serde;
