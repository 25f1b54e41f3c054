//! # Bit-Plane Writer and Reader
//!
//! A bit plane is the set of bits at one fixed position across every sample of a
//! [`PixelArray`]. Both directions walk the plane in storage order: bands vary fastest,
//! then columns, then rows. One sample carries one message bit, so a plane holds
//! `rows * columns * bands` bits.
//!
//! Only the three least-significant planes are addressable ([`BitPlane`]), and a
//! session visits each of them at most once, in the order given by [`PlaneOrder`].

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::common::error::StegoError;
use crate::common::pixels::PixelArray;
use crate::processing::bits::BitSequence;

/// One of the three least-significant bit positions of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum BitPlane {
    /// Least significant bit
    Zero,
    One,
    Two,
}

impl BitPlane {
    /// All planes, least significant first.
    pub const ALL: [BitPlane; 3] = [BitPlane::Zero, BitPlane::One, BitPlane::Two];

    /// Bit position counted from the least significant end.
    pub fn index(self) -> u8 {
        match self {
            BitPlane::Zero => 0,
            BitPlane::One => 1,
            BitPlane::Two => 2,
        }
    }

    pub fn mask(self) -> u8 {
        1 << self.index()
    }
}

impl TryFrom<u8> for BitPlane {
    type Error = StegoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(BitPlane::Zero),
            1 => Ok(BitPlane::One),
            2 => Ok(BitPlane::Two),
            other => Err(StegoError::InvalidPlane(other.to_string())),
        }
    }
}

impl From<BitPlane> for u8 {
    fn from(plane: BitPlane) -> Self {
        plane.index()
    }
}

impl FromStr for BitPlane {
    type Err = StegoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(BitPlane::Zero),
            "1" => Ok(BitPlane::One),
            "2" => Ok(BitPlane::Two),
            other => Err(StegoError::InvalidPlane(other.to_string())),
        }
    }
}

impl fmt::Display for BitPlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// The order planes are visited in during one encode or decode session.
///
/// The chosen plane comes first, the other two follow from least to most significant.
/// Each plane is yielded once; `None` means the session has run out of planes.
#[derive(Debug, Clone)]
pub struct PlaneOrder {
    planes: [BitPlane; 3],
    next: usize,
}

impl PlaneOrder {
    pub fn starting_at(first: BitPlane) -> Self {
        let mut planes = [first; 3];
        for (slot, plane) in planes[1..]
            .iter_mut()
            .zip(BitPlane::ALL.into_iter().filter(|&p| p != first))
        {
            *slot = plane;
        }
        Self { planes, next: 0 }
    }

    /// The full visiting order, regardless of how far iteration has got.
    pub fn planes(&self) -> [BitPlane; 3] {
        self.planes
    }

    /// Planes not yet handed out.
    pub fn remaining(&self) -> usize {
        self.planes.len() - self.next
    }
}

impl Default for PlaneOrder {
    fn default() -> Self {
        Self::starting_at(BitPlane::Zero)
    }
}

impl Iterator for PlaneOrder {
    type Item = BitPlane;

    fn next(&mut self) -> Option<BitPlane> {
        let plane = self.planes.get(self.next).copied()?;
        self.next += 1;
        Some(plane)
    }
}

/// Message bits one plane of `pixels` can hold.
pub fn capacity_bits(pixels: &PixelArray) -> usize {
    pixels.len()
}

/// Write `payload` into `plane` of a copy of `pixels`.
///
/// Returns the new array and whatever did not fit, or `None` when the whole payload was
/// placed. Positions past the end of the payload and every other plane are left as they
/// were.
pub fn write_plane(
    pixels: &PixelArray,
    payload: &BitSequence,
    plane: BitPlane,
) -> (PixelArray, Option<BitSequence>) {
    let capacity = capacity_bits(pixels);
    let (placed, remainder) = if payload.len() <= capacity {
        (payload.as_slice(), None)
    } else {
        let (head, tail) = payload.as_slice().split_at(capacity);
        (head, Some(BitSequence::from_bits(tail.iter().copied())))
    };

    let mut output = pixels.clone();
    let mask = plane.mask();
    let shift = plane.index();
    for (sample, &bit) in output.as_raw_mut().iter_mut().zip(placed) {
        *sample = (*sample & !mask) | (bit << shift);
    }

    debug!(
        "Wrote {} of {} bits into plane {} ({} slots)",
        placed.len(),
        payload.len(),
        plane,
        capacity
    );

    (output, remainder)
}

/// Bits recovered from one plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaneRead {
    /// Message bits up to (not including) the terminator, or everything read
    pub bits: BitSequence,
    /// Byte index of the terminator within this read, if one was found
    pub terminator: Option<usize>,
}

impl PlaneRead {
    pub fn found_terminator(&self) -> bool {
        self.terminator.is_some()
    }
}

/// Every bit of `plane`, in storage order.
pub fn plane_bits(pixels: &PixelArray, plane: BitPlane) -> BitSequence {
    let shift = plane.index();
    BitSequence::from_bits(pixels.as_raw().iter().map(|&sample| sample >> shift))
}

/// Read `plane` and look for the all-zero terminator byte.
///
/// Bits are grouped into bytes from the first bit of the plane. If byte `i` is zero the
/// first `i * 8` bits are returned; otherwise the whole plane is.
pub fn read_plane(pixels: &PixelArray, plane: BitPlane) -> PlaneRead {
    read_plane_after(pixels, plane, &BitSequence::new())
}

/// Like [`read_plane`], but byte grouping starts with `carry`: the bits of an unfinished
/// byte left over from the planes read before this one.
///
/// The returned bits include `carry`. A trailing group shorter than 8 bits is never taken
/// for a terminator; the caller carries it into the next plane.
pub fn read_plane_after(pixels: &PixelArray, plane: BitPlane, carry: &BitSequence) -> PlaneRead {
    let mut bits = carry.clone();
    bits.extend_from(&plane_bits(pixels, plane));

    let terminator = bits
        .as_slice()
        .chunks_exact(8)
        .position(|byte| byte.iter().all(|&bit| bit == 0));

    if let Some(index) = terminator {
        debug!("Terminator at byte {} of plane {}", index, plane);
        bits.truncate(index * 8);
    }

    PlaneRead { bits, terminator }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> BitSequence {
        s.parse().unwrap()
    }

    #[test]
    fn test_plane_parsing() {
        assert_eq!("0".parse::<BitPlane>().unwrap(), BitPlane::Zero);
        assert_eq!("2".parse::<BitPlane>().unwrap(), BitPlane::Two);
        assert!(matches!(
            "3".parse::<BitPlane>(),
            Err(StegoError::InvalidPlane(_))
        ));
        assert!(matches!(
            BitPlane::try_from(7u8),
            Err(StegoError::InvalidPlane(_))
        ));
        assert_eq!(BitPlane::Two.mask(), 0b100);
    }

    #[test]
    fn test_plane_order() {
        let order: Vec<u8> = PlaneOrder::default().map(u8::from).collect();
        assert_eq!(order, vec![0, 1, 2]);

        let order: Vec<u8> = PlaneOrder::starting_at(BitPlane::One).map(u8::from).collect();
        assert_eq!(order, vec![1, 0, 2]);

        let order: Vec<u8> = PlaneOrder::starting_at(BitPlane::Two).map(u8::from).collect();
        assert_eq!(order, vec![2, 0, 1]);
    }

    #[test]
    fn test_plane_order_is_exhausted_once() {
        let mut order = PlaneOrder::default();
        assert_eq!(order.remaining(), 3);
        assert_eq!(order.by_ref().count(), 3);
        assert_eq!(order.remaining(), 0);
        assert_eq!(order.next(), None);
    }

    #[test]
    fn test_write_in_storage_order() {
        let pixels = PixelArray::filled(1, 2, 2, 0);
        let (output, remainder) = write_plane(&pixels, &bits("101"), BitPlane::One);

        assert!(remainder.is_none());
        assert_eq!(output.as_raw(), &[0b10, 0, 0b10, 0]);
        assert_eq!(pixels.as_raw(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_exact_capacity_has_no_remainder() {
        let pixels = PixelArray::filled(2, 2, 2, 0);
        let (output, remainder) = write_plane(&pixels, &bits("11111111"), BitPlane::Zero);

        assert!(remainder.is_none());
        assert!(output.as_raw().iter().all(|&s| s == 1));
    }

    #[test]
    fn test_one_past_capacity_leaves_one_bit() {
        let pixels = PixelArray::filled(2, 2, 2, 0);
        let (_, remainder) = write_plane(&pixels, &bits("111111110"), BitPlane::Zero);

        assert_eq!(remainder, Some(bits("0")));
    }

    #[test]
    fn test_other_planes_untouched() {
        let samples: Vec<u8> = (0..=255).collect();
        let pixels = PixelArray::new(16, 16, 1, samples).unwrap();
        let payload = BitSequence::from_bits((0..256).map(|i| (i % 3 == 0) as u8));

        let (output, _) = write_plane(&pixels, &payload, BitPlane::Zero);
        for (before, after) in pixels.as_raw().iter().zip(output.as_raw()) {
            assert_eq!(before & 0xFE, after & 0xFE);
        }
        assert_eq!(plane_bits(&output, BitPlane::Zero), payload);
    }

    #[test]
    fn test_read_terminator_at_start() {
        let pixels = PixelArray::filled(1, 4, 4, 0xFE);
        let read = read_plane(&pixels, BitPlane::Zero);

        assert_eq!(read.terminator, Some(0));
        assert!(read.bits.is_empty());
    }

    #[test]
    fn test_read_terminator_at_last_byte() {
        let pixels = PixelArray::filled(1, 8, 4, 0xFF);
        let payload = bits("010000010100001001000011");
        let (pixels, _) = write_plane(&pixels, &payload, BitPlane::Zero);
        let pixels = {
            let mut samples = pixels.into_raw();
            for sample in &mut samples[24..] {
                *sample &= 0xFE;
            }
            PixelArray::new(1, 8, 4, samples).unwrap()
        };

        let read = read_plane(&pixels, BitPlane::Zero);
        assert_eq!(read.terminator, Some(3));
        assert_eq!(read.bits, payload);
    }

    #[test]
    fn test_read_without_terminator_returns_whole_plane() {
        let pixels = PixelArray::filled(2, 3, 3, 0b0000_0100);
        let read = read_plane(&pixels, BitPlane::Two);

        assert!(!read.found_terminator());
        assert_eq!(read.bits.len(), 18);
        assert!(read.bits.as_slice().iter().all(|&b| b == 1));
    }

    #[test]
    fn test_short_trailing_group_is_not_a_terminator() {
        // 12 slots: one full 0xFF byte, then four zero bits
        let mut samples = vec![1u8; 8];
        samples.extend([0u8; 4]);
        let pixels = PixelArray::new(1, 12, 1, samples).unwrap();

        let read = read_plane(&pixels, BitPlane::Zero);
        assert!(!read.found_terminator());
        assert_eq!(read.bits.len(), 12);
    }

    #[test]
    fn test_terminator_straddling_planes() {
        // previous plane ended with four zero bits; four more zeros complete the byte
        let pixels = PixelArray::filled(1, 8, 1, 0);
        let read = read_plane_after(&pixels, BitPlane::One, &bits("0000"));

        assert_eq!(read.terminator, Some(0));
        assert!(read.bits.is_empty());
    }

    #[test]
    fn test_carry_shifts_byte_grid() {
        // carry "0100" + plane "0001 0000 0000" -> 0x41 then a zero byte
        let mut samples = vec![0u8; 12];
        samples[3] = 1;
        let pixels = PixelArray::new(1, 12, 1, samples).unwrap();

        let read = read_plane_after(&pixels, BitPlane::Zero, &bits("0100"));
        assert_eq!(read.terminator, Some(1));
        assert_eq!(read.bits, bits("01000001"));
    }
}
