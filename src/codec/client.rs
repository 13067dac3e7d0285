//! Wire encoding for [`ClientEnvelope`] (§6): a record with at least
//! `client`, `pipeline`, `function`, `stage`, `payload`, all tagged so
//! unknown fields round-trip.

// Layer 1: Standard library imports
use std::collections::HashMap;

// Layer 2: Third-party crate imports
use bytes::Bytes;

// Layer 3: Internal module imports
use super::error::CodecError;
use super::wire::{
    read_any_field, read_bytes_field, read_key, write_any_field, write_bytes_field, RawField,
    WIRE_LEN,
};
use crate::message::client::UnknownField;
use crate::message::ClientEnvelope;

const FIELD_CLIENT_ID: u32 = 1;
const FIELD_PIPELINE_ID: u32 = 2;
const FIELD_FUNCTION: u32 = 3;
const FIELD_STAGE: u32 = 4;
const FIELD_PAYLOAD: u32 = 5;
const FIELD_CACHE_KEY: u32 = 6;
const FIELD_METADATA_ENTRY: u32 = 7;

const METADATA_KEY_TAG: u32 = 1;
const METADATA_VALUE_TAG: u32 = 2;

fn encode_metadata_entry(key: &str, value: &str) -> Vec<u8> {
    let mut entry = Vec::new();
    write_bytes_field(&mut entry, METADATA_KEY_TAG, key.as_bytes());
    write_bytes_field(&mut entry, METADATA_VALUE_TAG, value.as_bytes());
    entry
}

fn decode_metadata_entry(data: &[u8]) -> Result<(String, String), CodecError> {
    let mut cursor = 0usize;
    let mut key: Option<String> = None;
    let mut value: Option<String> = None;

    while cursor < data.len() {
        let (tag, _wire_type, key_len) = read_key(&data[cursor..])?;
        cursor += key_len;
        let (raw, field_len) = read_bytes_field(&data[cursor..])?;
        cursor += field_len;

        let text = String::from_utf8(raw)
            .map_err(|_| CodecError::malformed("metadata entry is not valid utf-8"))?;
        match tag {
            METADATA_KEY_TAG => key = Some(text),
            METADATA_VALUE_TAG => value = Some(text),
            _ => {}
        }
    }

    Ok((
        key.ok_or_else(|| CodecError::missing_field("metadata.key"))?,
        value.ok_or_else(|| CodecError::missing_field("metadata.value"))?,
    ))
}

/// Serialize a [`ClientEnvelope`] to its wire form, re-emitting preserved
/// unknown fields in their original tags.
pub fn encode(envelope: &ClientEnvelope) -> Vec<u8> {
    let mut out = Vec::with_capacity(envelope.payload.len() + 64);
    write_bytes_field(&mut out, FIELD_CLIENT_ID, envelope.client_id.as_bytes());
    write_bytes_field(&mut out, FIELD_PIPELINE_ID, envelope.pipeline_id.as_bytes());
    write_bytes_field(&mut out, FIELD_FUNCTION, envelope.function.as_bytes());
    write_bytes_field(&mut out, FIELD_STAGE, envelope.stage.as_bytes());
    write_bytes_field(&mut out, FIELD_PAYLOAD, &envelope.payload);

    if let Some(cache_key) = &envelope.cache_key {
        write_bytes_field(&mut out, FIELD_CACHE_KEY, cache_key.as_bytes());
    }

    for (key, value) in &envelope.metadata {
        let entry = encode_metadata_entry(key, value);
        write_bytes_field(&mut out, FIELD_METADATA_ENTRY, &entry);
    }

    for unknown in &envelope.unknown_fields {
        let field = if unknown.wire_type == WIRE_LEN {
            RawField::LengthDelimited(unknown.raw.clone())
        } else {
            // Varint fields were stored as their already-decoded value in
            // little-endian bytes is overkill here; re-read them back.
            let (value, _) =
                super::wire::read_varint(&unknown.raw).unwrap_or((0, unknown.raw.len()));
            RawField::Varint(value)
        };
        write_any_field(&mut out, unknown.tag, &field);
    }

    out
}

/// Parse a [`ClientEnvelope`] from its wire form. Fields this codec does
/// not assign a meaning to are preserved verbatim in `unknown_fields`.
pub fn decode(data: &[u8]) -> Result<ClientEnvelope, CodecError> {
    let mut cursor = 0usize;

    let mut client_id: Option<String> = None;
    let mut pipeline_id: Option<String> = None;
    let mut function: Option<String> = None;
    let mut stage: Option<String> = None;
    let mut payload: Option<Bytes> = None;
    let mut cache_key: Option<String> = None;
    let mut metadata = HashMap::new();
    let mut unknown_fields = Vec::new();

    while cursor < data.len() {
        let (tag, field, consumed) = read_any_field(&data[cursor..])?;
        cursor += consumed;

        let as_text = |field: &RawField| -> Result<String, CodecError> {
            match field {
                RawField::LengthDelimited(raw) => String::from_utf8(raw.clone())
                    .map_err(|_| CodecError::malformed("field is not valid utf-8")),
                RawField::Varint(_) => Err(CodecError::malformed("expected length-delimited field")),
            }
        };

        match tag {
            FIELD_CLIENT_ID => client_id = Some(as_text(&field)?),
            FIELD_PIPELINE_ID => pipeline_id = Some(as_text(&field)?),
            FIELD_FUNCTION => function = Some(as_text(&field)?),
            FIELD_STAGE => stage = Some(as_text(&field)?),
            FIELD_PAYLOAD => {
                if let RawField::LengthDelimited(raw) = &field {
                    payload = Some(Bytes::from(raw.clone()));
                } else {
                    return Err(CodecError::malformed("payload must be length-delimited"));
                }
            }
            FIELD_CACHE_KEY => cache_key = Some(as_text(&field)?),
            FIELD_METADATA_ENTRY => {
                if let RawField::LengthDelimited(raw) = &field {
                    let (key, value) = decode_metadata_entry(raw)?;
                    metadata.insert(key, value);
                } else {
                    return Err(CodecError::malformed("metadata must be length-delimited"));
                }
            }
            other => {
                let (wire_type, raw) = match &field {
                    RawField::Varint(value) => {
                        let mut raw = Vec::new();
                        super::wire::write_varint(&mut raw, *value);
                        (super::wire::WIRE_VARINT, raw)
                    }
                    RawField::LengthDelimited(raw) => (WIRE_LEN, raw.clone()),
                };
                unknown_fields.push(UnknownField {
                    tag: other,
                    wire_type,
                    raw,
                });
            }
        }
    }

    Ok(ClientEnvelope {
        client_id: client_id.ok_or_else(|| CodecError::missing_field("client_id"))?,
        pipeline_id: pipeline_id.ok_or_else(|| CodecError::missing_field("pipeline_id"))?,
        function: function.ok_or_else(|| CodecError::missing_field("function"))?,
        stage: stage.ok_or_else(|| CodecError::missing_field("stage"))?,
        payload: payload.ok_or_else(|| CodecError::missing_field("payload"))?,
        cache_key,
        metadata,
        unknown_fields,
    })
}
