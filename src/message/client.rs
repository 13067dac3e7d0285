// Layer 1: Standard library imports
use std::collections::HashMap;

// Layer 2: Third-party crate imports
use bytes::Bytes;
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
// (none)

/// An opaque tagged field this crate's codec does not itself define a
/// meaning for. Preserved verbatim across a decode/encode round trip
/// (§4.2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnknownField {
    /// Wire field number.
    pub tag: u32,
    /// Raw wire-type byte as read off the wire (0 = varint, 2 = length-delimited).
    pub wire_type: u8,
    /// Raw bytes of the field, already stripped of its key/length prefix.
    pub raw: Vec<u8>,
}

/// The end-to-end client payload (§3), opaque to the broker and to every
/// intermediate node except for its `payload` field.
///
/// Fields other than `payload` must survive a round trip through this
/// crate unchanged, including tagged fields this codec does not itself
/// assign a meaning to ([`UnknownField`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientEnvelope {
    /// Identity of the originating client.
    pub client_id: String,

    /// Identity of the pipeline this request belongs to.
    pub pipeline_id: String,

    /// Application function name being invoked.
    pub function: String,

    /// Pipeline stage name.
    pub stage: String,

    /// Opaque application payload; the only field intermediate nodes
    /// inspect or rewrite.
    pub payload: Bytes,

    /// Optional application-supplied cache key override.
    pub cache_key: Option<String>,

    /// Free-form string metadata carried end-to-end.
    pub metadata: HashMap<String, String>,

    /// Tagged fields this crate's codec does not recognise, preserved
    /// verbatim for round-trip fidelity.
    pub unknown_fields: Vec<UnknownField>,
}

impl ClientEnvelope {
    /// Build a minimal envelope with empty metadata and no unknown fields.
    pub fn new(
        client_id: impl Into<String>,
        pipeline_id: impl Into<String>,
        function: impl Into<String>,
        stage: impl Into<String>,
        payload: impl Into<Bytes>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            pipeline_id: pipeline_id.into(),
            function: function.into(),
            stage: stage.into(),
            payload: payload.into(),
            cache_key: None,
            metadata: HashMap::new(),
            unknown_fields: Vec::new(),
        }
    }

    /// Replace the payload, keeping every other field byte-equal (§8 P4).
    pub fn with_payload(mut self, payload: impl Into<Bytes>) -> Self {
        self.payload = payload.into();
        self
    }
}
