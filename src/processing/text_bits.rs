//! # Text ↔ Bit Codec
//!
//! Messages are handled as raw bytes, so text that is not valid UTF-8 (lone surrogates,
//! truncated multi-byte sequences) is carried through unchanged instead of rejected.
//!
//! The codec treats the message plus its NUL terminator as one big-endian unsigned
//! integer: leading zero bytes carry no value and are dropped, and an all-zero payload
//! collapses to the single terminator byte.

use crate::common::error::Result;
use crate::processing::bits::BitSequence;

/// End-of-message marker appended before embedding.
pub const SENTINEL: u8 = 0;

/// Convert message bytes to the bit sequence that gets embedded, terminator included.
pub fn encode(text: &[u8]) -> BitSequence {
    let mut bytes = Vec::with_capacity(text.len() + 1);
    bytes.extend_from_slice(text);
    bytes.push(SENTINEL);
    BitSequence::from_bytes(minimal_bytes(&bytes).unwrap_or(&[SENTINEL]))
}

/// Convenience wrapper over [`encode`] for string input.
pub fn encode_str(text: &str) -> BitSequence {
    encode(text.as_bytes())
}

/// Convert recovered bits back to message bytes.
///
/// An input that packs to nothing (no bits, or only zero bits) yields a single NUL
/// character rather than an empty message.
pub fn decode(bits: &BitSequence) -> Vec<u8> {
    let bytes = bits.to_bytes();
    match minimal_bytes(&bytes) {
        Some(bytes) => bytes.to_vec(),
        None => vec![SENTINEL],
    }
}

/// [`decode`], then require the bytes to be UTF-8.
///
/// # Errors
/// [`StegoError::Encoding`](crate::common::error::StegoError::Encoding) if they are not.
pub fn decode_to_string(bits: &BitSequence) -> Result<String> {
    Ok(String::from_utf8(decode(bits))?)
}

/// Strip leading zero bytes; `None` if nothing is left.
fn minimal_bytes(bytes: &[u8]) -> Option<&[u8]> {
    bytes
        .iter()
        .position(|&b| b != 0)
        .map(|start| &bytes[start..])
}
