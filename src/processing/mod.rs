//! # Bit-Plane Steganography
//!
//! The codec proper: text to bits, bits into and out of the three low bit planes, and
//! the session that spreads one message over several planes.

pub mod bit_plane;
pub mod bits;
pub mod report;
pub mod steganography;
pub mod text_bits;

// Re-export main functions for convenience
pub use steganography::{embed_message, embed_text_bytes, extract_message, extract_text_bytes};
