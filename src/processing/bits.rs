//! # Bit Sequences
//!
//! [`BitSequence`] holds one bit per `u8` unit (always `0` or `1`), most significant bit
//! of each byte first. Its `Display` form is the string of `0`/`1` digits.

use std::fmt;
use std::str::FromStr;

use crate::common::error::StegoError;

/// An ordered sequence of bits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitSequence {
    bits: Vec<u8>,
}

impl BitSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand bytes MSB-first.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let bits = bytes
            .iter()
            .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1))
            .collect();
        Self { bits }
    }

    /// Build from arbitrary values, keeping only their lowest bit.
    pub fn from_bits<I: IntoIterator<Item = u8>>(bits: I) -> Self {
        Self {
            bits: bits.into_iter().map(|b| b & 1).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bits
    }

    pub fn extend_from(&mut self, other: &BitSequence) {
        self.bits.extend_from_slice(&other.bits);
    }

    /// Split off the bits from `at` onwards, leaving `[0, at)` in place.
    ///
    /// # Panics
    /// If `at > self.len()`.
    pub fn split_off(&mut self, at: usize) -> BitSequence {
        BitSequence {
            bits: self.bits.split_off(at),
        }
    }

    /// Keep the first `len` bits.
    pub fn truncate(&mut self, len: usize) {
        self.bits.truncate(len);
    }

    /// Number of trailing bits that do not complete a byte.
    pub fn partial_byte_len(&self) -> usize {
        self.bits.len() % 8
    }

    /// Pack into bytes, treating the sequence as a big-endian integer: a length that is
    /// not a multiple of 8 is padded with zeros on the left.
    pub fn to_bytes(&self) -> Vec<u8> {
        let pad = (8 - self.bits.len() % 8) % 8;
        let mut bytes = Vec::with_capacity((self.bits.len() + pad) / 8);
        let mut acc = 0u8;
        for (i, &bit) in std::iter::repeat(&0u8).take(pad).chain(&self.bits).enumerate() {
            acc = (acc << 1) | bit;
            if i % 8 == 7 {
                bytes.push(acc);
                acc = 0;
            }
        }
        bytes
    }
}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit == 0 { "0" } else { "1" })?;
        }
        Ok(())
    }
}

impl FromStr for BitSequence {
    type Err = StegoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(0),
                '1' => Ok(1),
                other => Err(StegoError::InvalidArgument(format!(
                    "'{}' is not a bit digit",
                    other
                ))),
            })
            .collect::<Result<Vec<u8>, _>>()
            .map(|bits| Self { bits })
    }
}
