//! Wire encoding for [`BrokerEnvelope`] (§6): field 1 = text `key`, field 2 =
//! bytes `payload`.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use bytes::Bytes;

// Layer 3: Internal module imports
use super::error::CodecError;
use super::wire::{read_bytes_field, read_key, write_bytes_field, WIRE_LEN};
use crate::message::BrokerEnvelope;
use crate::util::CorrelationKey;

const FIELD_KEY: u32 = 1;
const FIELD_PAYLOAD: u32 = 2;

/// Serialize a [`BrokerEnvelope`] to its wire form.
pub fn encode(envelope: &BrokerEnvelope) -> Vec<u8> {
    let mut out = Vec::with_capacity(envelope.payload.len() + 16);
    write_bytes_field(&mut out, FIELD_KEY, envelope.key.as_str().as_bytes());
    write_bytes_field(&mut out, FIELD_PAYLOAD, &envelope.payload);
    out
}

/// Parse a [`BrokerEnvelope`] from its wire form.
///
/// Both fields are required; anything else encountered is preserved only
/// in the sense that it's skipped without erroring (the Broker Envelope
/// schema has no extension point — §6 — unlike the Client Envelope).
pub fn decode(data: &[u8]) -> Result<BrokerEnvelope, CodecError> {
    let mut cursor = 0usize;
    let mut key: Option<String> = None;
    let mut payload: Option<Bytes> = None;

    while cursor < data.len() {
        let (tag, wire_type, key_len) = read_key(&data[cursor..])?;
        cursor += key_len;

        if wire_type != WIRE_LEN {
            return Err(CodecError::malformed(format!(
                "unexpected wire type {wire_type} for tag {tag}"
            )));
        }

        let (raw, field_len) = read_bytes_field(&data[cursor..])?;
        cursor += field_len;

        match tag {
            FIELD_KEY => {
                key = Some(String::from_utf8(raw).map_err(|_| {
                    CodecError::malformed("key field is not valid utf-8")
                })?);
            }
            FIELD_PAYLOAD => payload = Some(Bytes::from(raw)),
            _ => { /* no unknown-field extension point on this schema */ }
        }
    }

    Ok(BrokerEnvelope {
        key: CorrelationKey::from_string(key.ok_or_else(|| CodecError::missing_field("key"))?),
        payload: payload.ok_or_else(|| CodecError::missing_field("payload"))?,
    })
}
