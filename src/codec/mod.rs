//! Envelope codec (C2): deterministic length-prefixed binary encodings for
//! the two message shapes that travel through this crate.
//!
//! Both encodings share the same underlying wire grammar ([`wire`]): a
//! sequence of `(tag, wire_type)` keys followed by a varint integer or a
//! length-delimited byte run, modelled after a widely used tagged-field
//! wire format. A field number this crate does not recognise is preserved
//! verbatim and re-emitted on re-serialization (§4.2).

pub mod broker;
pub mod client;
pub mod error;
pub mod wire;

pub use error::CodecError;
