//! Low-level tagged-field wire primitives shared by both envelope codecs.
//!
//! Field keys are `(tag << 3) | wire_type`, varint-encoded, mirroring a
//! widely used tagged-field wire format. `WIRE_VARINT` carries an unsigned
//! integer; `WIRE_LEN` carries a varint length followed by that many raw
//! bytes.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use super::error::CodecError;

/// Wire type for a varint-encoded integer field.
pub const WIRE_VARINT: u8 = 0;

/// Wire type for a length-delimited byte-run field.
pub const WIRE_LEN: u8 = 2;

/// Write an unsigned LEB128 varint.
pub fn write_varint(out: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            break;
        }
        out.push(byte | 0x80);
    }
}

/// Read an unsigned LEB128 varint, returning the value and bytes consumed.
pub fn read_varint(data: &[u8]) -> Result<(u64, usize), CodecError> {
    let mut value = 0u64;
    let mut shift = 0u32;
    let mut cursor = 0usize;

    loop {
        let byte = *data
            .get(cursor)
            .ok_or_else(|| CodecError::truncated("varint"))?;
        cursor += 1;

        value |= ((byte & 0x7F) as u64) << shift;

        if byte & 0x80 == 0 {
            break;
        }

        shift += 7;
        if shift >= 64 {
            return Err(CodecError::malformed("varint exceeds 64 bits"));
        }
    }

    Ok((value, cursor))
}

/// Write a field key `(tag << 3) | wire_type`.
pub fn write_key(out: &mut Vec<u8>, tag: u32, wire_type: u8) {
    write_varint(out, ((tag as u64) << 3) | (wire_type as u64));
}

/// Read a field key, returning `(tag, wire_type, bytes consumed)`.
pub fn read_key(data: &[u8]) -> Result<(u32, u8, usize), CodecError> {
    let (key, consumed) = read_varint(data)?;
    let tag = u32::try_from(key >> 3).map_err(|_| CodecError::malformed("tag overflow"))?;
    let wire_type = (key & 0x7) as u8;
    Ok((tag, wire_type, consumed))
}

/// Write a length-delimited byte run: varint length followed by the bytes.
pub fn write_bytes_field(out: &mut Vec<u8>, tag: u32, bytes: &[u8]) {
    write_key(out, tag, WIRE_LEN);
    write_varint(out, bytes.len() as u64);
    out.extend_from_slice(bytes);
}

/// Read a length-delimited byte run, returning `(bytes, bytes consumed)`.
pub fn read_bytes_field(data: &[u8]) -> Result<(Vec<u8>, usize), CodecError> {
    let (len, len_consumed) = read_varint(data)?;
    let len = len as usize;
    let start = len_consumed;
    let end = start
        .checked_add(len)
        .ok_or_else(|| CodecError::malformed("length overflow"))?;
    let raw = data
        .get(start..end)
        .ok_or_else(|| CodecError::truncated("length-delimited field"))?
        .to_vec();
    Ok((raw, end))
}

/// Raw, still-tagged field value read off the wire, used to carry fields
/// this codec doesn't itself assign a meaning to (§4.2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawField {
    /// A varint field; `raw` is the value's bytes, pre-shift.
    Varint(u64),
    /// A length-delimited field; `raw` is the content with no length prefix.
    LengthDelimited(Vec<u8>),
}

/// Read one complete field (key + value) starting at `data[0]`, returning
/// the field's tag, its value, and total bytes consumed.
pub fn read_any_field(data: &[u8]) -> Result<(u32, RawField, usize), CodecError> {
    let (tag, wire_type, key_len) = read_key(data)?;
    match wire_type {
        WIRE_VARINT => {
            let (value, value_len) = read_varint(&data[key_len..])?;
            Ok((tag, RawField::Varint(value), key_len + value_len))
        }
        WIRE_LEN => {
            let (raw, value_len) = read_bytes_field(&data[key_len..])?;
            Ok((tag, RawField::LengthDelimited(raw), key_len + value_len))
        }
        other => Err(CodecError::malformed(format!(
            "unsupported wire type {other}"
        ))),
    }
}

/// Re-emit a field exactly as it was read, preserving its original tag.
pub fn write_any_field(out: &mut Vec<u8>, tag: u32, field: &RawField) {
    match field {
        RawField::Varint(value) => {
            write_key(out, tag, WIRE_VARINT);
            write_varint(out, *value);
        }
        RawField::LengthDelimited(raw) => {
            write_bytes_field(out, tag, raw);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_varint_roundtrip_small() {
        let mut buf = Vec::new();
        write_varint(&mut buf, 42);
        let (value, consumed) = read_varint(&buf).unwrap();
        assert_eq!(value, 42);
        assert_eq!(consumed, buf.len());
    }

    #[test]
    fn test_varint_roundtrip_large() {
        let mut buf = Vec::new();
        write_varint(&mut buf, u64::MAX);
        let (value, consumed) = read_varint(&buf).unwrap();
        assert_eq!(value, u64::MAX);
        assert_eq!(consumed, buf.len());
    }

    #[test]
    fn test_key_roundtrip() {
        let mut buf = Vec::new();
        write_key(&mut buf, 7, WIRE_LEN);
        let (tag, wire_type, consumed) = read_key(&buf).unwrap();
        assert_eq!(tag, 7);
        assert_eq!(wire_type, WIRE_LEN);
        assert_eq!(consumed, buf.len());
    }

    #[test]
    fn test_bytes_field_roundtrip() {
        let mut buf = Vec::new();
        write_bytes_field(&mut buf, 1, b"hello world");

        let (_tag, _wire_type, key_len) = read_key(&buf).unwrap();
        let (raw, _) = read_bytes_field(&buf[key_len..]).unwrap();
        assert_eq!(raw, b"hello world");
    }

    #[test]
    fn test_truncated_varint_errors() {
        let truncated = vec![0x80];
        assert!(read_varint(&truncated).is_err());
    }

    #[test]
    fn test_truncated_length_delimited_errors() {
        let mut buf = Vec::new();
        write_varint(&mut buf, 100); // claims 100 bytes but supplies none
        assert!(read_bytes_field(&buf).is_err());
    }
}
