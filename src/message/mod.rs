//! Message shapes carried between components and across the broker.
//!
//! Two fixed record types flow through this crate (§3): the opaque
//! [`BrokerEnvelope`] the broker itself ever looks at, and the richer
//! [`ClientEnvelope`] that inbound components translate to and from at the
//! system boundary.

pub mod client;
pub mod envelope;

pub use client::ClientEnvelope;
pub use envelope::BrokerEnvelope;
