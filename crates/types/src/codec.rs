// Path: crates/types/src/codec.rs

//! The wire codec for every message exchanged with the network.
//!
//! Messages use a Protocol-Buffers-compatible tag/length/value encoding. Typed
//! messages live in [`crate::proto`] and derive `prost::Message`; this module
//! is the single entry point used to turn them into bytes and back, plus a small
//! field-level API ([`encode_field`], [`encode_message`], [`FieldReader`]) for
//! code that needs to work with raw tags directly.
//!
//! Decoding is strict: a truncated buffer or an inconsistent length prefix fails
//! with [`CodecError::MalformedMessage`] and never yields a partial value.
//! Fields with unknown numbers are skipped according to their wire type, so a
//! newer network can add fields without breaking older clients.

use crate::error::CodecError;
use bytes::{Buf, BufMut};
use prost::encoding::{decode_varint, encode_key, encode_varint};
use prost::Message;

pub use prost::encoding::WireType;

/// The largest field number a tag may carry.
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// Encodes a message into its canonical byte representation.
///
/// Fields are written in ascending field-number order and default values are
/// omitted, so two equal messages always produce identical bytes. Signatures are
/// computed over the output of this function.
pub fn to_bytes_canonical<M: Message>(message: &M) -> Vec<u8> {
    message.encode_to_vec()
}

/// Decodes a message from its canonical byte representation.
///
/// Unknown fields are dropped. Truncated or otherwise inconsistent input is
/// rejected with [`CodecError::MalformedMessage`].
pub fn from_bytes_canonical<M: Message + Default>(bytes: &[u8]) -> Result<M, CodecError> {
    M::decode(bytes).map_err(|e| CodecError::MalformedMessage(e.to_string()))
}

/// A single scalar or length-delimited value as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// A variable-length integer (wire type 0).
    Varint(u64),
    /// A little-endian 64-bit value (wire type 1).
    Fixed64(u64),
    /// A length-prefixed byte string, string or embedded message (wire type 2).
    Bytes(&'a [u8]),
    /// A little-endian 32-bit value (wire type 5).
    Fixed32(u32),
}

impl FieldValue<'_> {
    /// The wire type used to encode this value.
    pub fn wire_type(&self) -> WireType {
        match self {
            FieldValue::Varint(_) => WireType::Varint,
            FieldValue::Fixed64(_) => WireType::SixtyFourBit,
            FieldValue::Bytes(_) => WireType::LengthDelimited,
            FieldValue::Fixed32(_) => WireType::ThirtyTwoBit,
        }
    }
}

/// Maps a signed integer onto an unsigned one so that small magnitudes of
/// either sign encode to short varints.
pub fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`zigzag_encode`].
pub fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Appends one tagged field to `buf`.
///
/// Returns [`CodecError::InvalidFieldNumber`] if `field_number` is zero or
/// outside the representable range.
pub fn encode_field(
    field_number: u32,
    value: &FieldValue<'_>,
    buf: &mut impl BufMut,
) -> Result<(), CodecError> {
    check_field_number(field_number)?;
    encode_key(field_number, value.wire_type(), buf);
    match value {
        FieldValue::Varint(v) => encode_varint(*v, buf),
        FieldValue::Fixed64(v) => buf.put_u64_le(*v),
        FieldValue::Bytes(b) => {
            encode_varint(b.len() as u64, buf);
            buf.put_slice(b);
        }
        FieldValue::Fixed32(v) => buf.put_u32_le(*v),
    }
    Ok(())
}

/// Appends a length-prefixed embedded message under `field_number`.
pub fn encode_message(
    field_number: u32,
    nested: &[u8],
    buf: &mut impl BufMut,
) -> Result<(), CodecError> {
    encode_field(field_number, &FieldValue::Bytes(nested), buf)
}

/// Appends a signed integer field using zig-zag mapping.
pub fn encode_sint64(field_number: u32, value: i64, buf: &mut impl BufMut) -> Result<(), CodecError> {
    encode_field(field_number, &FieldValue::Varint(zigzag_encode(value)), buf)
}

fn check_field_number(field_number: u32) -> Result<(), CodecError> {
    if field_number == 0 || field_number > MAX_FIELD_NUMBER {
        return Err(CodecError::InvalidFieldNumber(field_number));
    }
    Ok(())
}

/// Iterates the top-level fields of an encoded message.
///
/// Each call to [`FieldReader::next_field`] yields the field number together with
/// its value. Callers dispatch on the field number and simply ignore numbers they
/// do not know; the reader has already consumed the value using the wire type's
/// length rule. Group wire types are deprecated and rejected.
#[derive(Debug)]
pub struct FieldReader<'a> {
    buf: &'a [u8],
}

impl<'a> FieldReader<'a> {
    /// Creates a reader over `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// Returns `true` once every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Reads the next field, or `None` at the end of the buffer.
    pub fn next_field(&mut self) -> Result<Option<(u32, FieldValue<'a>)>, CodecError> {
        if self.buf.is_empty() {
            return Ok(None);
        }
        let key = decode_varint(&mut self.buf).map_err(malformed)?;
        if key > u64::from(u32::MAX) {
            return Err(CodecError::MalformedMessage(format!("invalid key value: {}", key)));
        }
        let field_number = (key >> 3) as u32;
        check_field_number(field_number)
            .map_err(|_| CodecError::MalformedMessage(format!("invalid field number: {}", field_number)))?;

        let value = match key & 0x07 {
            0 => FieldValue::Varint(decode_varint(&mut self.buf).map_err(malformed)?),
            1 => {
                self.require(8)?;
                FieldValue::Fixed64(self.buf.get_u64_le())
            }
            2 => {
                let len = decode_varint(&mut self.buf).map_err(malformed)?;
                let len = usize::try_from(len).map_err(|_| {
                    CodecError::MalformedMessage(format!("length prefix {} overflows", len))
                })?;
                self.require(len)?;
                let (value, rest) = self.buf.split_at(len);
                self.buf = rest;
                FieldValue::Bytes(value)
            }
            5 => {
                self.require(4)?;
                FieldValue::Fixed32(self.buf.get_u32_le())
            }
            other => {
                return Err(CodecError::MalformedMessage(format!(
                    "unsupported wire type {} for field {}",
                    other, field_number
                )))
            }
        };
        Ok(Some((field_number, value)))
    }

    fn require(&self, len: usize) -> Result<(), CodecError> {
        if self.buf.len() < len {
            return Err(CodecError::MalformedMessage(format!(
                "truncated field: need {} bytes, {} remaining",
                len,
                self.buf.len()
            )));
        }
        Ok(())
    }
}

fn malformed(e: prost::DecodeError) -> CodecError {
    CodecError::MalformedMessage(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto;

    fn sample_body() -> proto::TransactionBody {
        proto::TransactionBody {
            transaction_id: Some(proto::TransactionId {
                transaction_valid_start: Some(proto::Timestamp {
                    seconds: 1_700_000_000,
                    nanos: 42,
                }),
                account_id: Some(proto::AccountId {
                    shard_num: 0,
                    realm_num: 0,
                    account_num: 1001,
                }),
                scheduled: false,
                nonce: 0,
            }),
            node_account_id: Some(proto::AccountId {
                shard_num: 0,
                realm_num: 0,
                account_num: 3,
            }),
            transaction_fee: 200_000_000,
            transaction_valid_duration: Some(proto::Duration { seconds: 120 }),
            memo: "hello".to_string(),
            data: Some(proto::transaction_body::Data::ConsensusSubmitMessage(
                proto::ConsensusSubmitMessageTransactionBody {
                    topic_id: Some(proto::TopicId {
                        shard_num: 0,
                        realm_num: 0,
                        topic_num: 77,
                    }),
                    message: b"payload".to_vec(),
                    chunk_info: None,
                },
            )),
        }
    }

    #[test]
    fn test_canonical_codec_roundtrip() {
        let body = sample_body();
        let encoded = to_bytes_canonical(&body);
        assert!(!encoded.is_empty());

        let decoded: proto::TransactionBody = from_bytes_canonical(&encoded).unwrap();
        assert_eq!(body, decoded);
        // Canonical: re-encoding is byte-identical.
        assert_eq!(encoded, to_bytes_canonical(&decoded));
    }

    #[test]
    fn test_unknown_fields_are_dropped() {
        let body = sample_body();
        let mut encoded = to_bytes_canonical(&body);

        // A newer network may append fields this client has never heard of.
        encode_field(900, &FieldValue::Varint(12345), &mut encoded).unwrap();
        encode_message(901, b"\x08\x01", &mut encoded).unwrap();
        encode_field(902, &FieldValue::Fixed64(7), &mut encoded).unwrap();
        encode_field(903, &FieldValue::Fixed32(9), &mut encoded).unwrap();

        let decoded: proto::TransactionBody = from_bytes_canonical(&encoded).unwrap();
        assert_eq!(body, decoded);
    }

    #[test]
    fn test_canonical_decode_failure() {
        let mut encoded = to_bytes_canonical(&sample_body());
        encoded.pop();
        encoded.pop();

        let result = from_bytes_canonical::<proto::TransactionBody>(&encoded);
        assert!(matches!(result, Err(CodecError::MalformedMessage(_))));
    }

    #[test]
    fn test_field_reader_dispatch_and_skip() {
        let mut buf = Vec::new();
        encode_field(1, &FieldValue::Varint(150), &mut buf).unwrap();
        encode_sint64(2, -3, &mut buf).unwrap();
        encode_message(3, b"abc", &mut buf).unwrap();
        encode_field(4, &FieldValue::Fixed32(0xdead_beef), &mut buf).unwrap();

        let mut reader = FieldReader::new(&buf);
        let mut seen = Vec::new();
        while let Some((field, value)) = reader.next_field().unwrap() {
            match (field, value) {
                (1, FieldValue::Varint(v)) => seen.push(v as i64),
                (2, FieldValue::Varint(v)) => seen.push(zigzag_decode(v)),
                // 3 and 4 are "unknown" here and simply skipped.
                _ => {}
            }
        }
        assert!(reader.is_empty());
        assert_eq!(seen, vec![150, -3]);
    }

    #[test]
    fn test_field_reader_rejects_bad_length_prefix() {
        let mut buf = Vec::new();
        encode_message(3, b"abcdef", &mut buf).unwrap();
        buf.truncate(buf.len() - 2);

        let mut reader = FieldReader::new(&buf);
        assert!(matches!(
            reader.next_field(),
            Err(CodecError::MalformedMessage(_))
        ));
    }

    #[test]
    fn test_zigzag_mapping() {
        assert_eq!(zigzag_encode(0), 0);
        assert_eq!(zigzag_encode(-1), 1);
        assert_eq!(zigzag_encode(1), 2);
        assert_eq!(zigzag_encode(-2), 3);
        assert_eq!(zigzag_decode(zigzag_encode(i64::MIN)), i64::MIN);
        assert_eq!(zigzag_decode(zigzag_encode(i64::MAX)), i64::MAX);
    }

    #[test]
    fn test_field_number_zero_rejected() {
        let mut buf = Vec::new();
        assert!(matches!(
            encode_field(0, &FieldValue::Varint(1), &mut buf),
            Err(CodecError::InvalidFieldNumber(0))
        ));
    }
}
