//! # Multi-Plane Steganography
//!
//! Hides text in the low bit planes of an image and recovers it.
//!
//! ## Algorithm
//!
//! ### Encoding Process
//! 1. Convert the text to bits and append a NUL terminator byte
//! 2. Write as many bits as fit into the first plane of the [`PlaneOrder`]
//! 3. Spill what is left into the next plane, and the next
//! 4. Stop when nothing is left, or after the third plane with a
//!    [`Diagnostic::CapacityExceeded`]; the image keeps the prefix that fit
//!
//! ### Decoding Process
//! 1. Read the planes in the same order, regrouping bits into bytes
//! 2. Stop at the first all-zero byte
//! 3. If no plane holds one, raise [`Diagnostic::SentinelNotFound`] and decode whatever
//!    was read
//!
//! ### Capacity
//! Each plane holds one bit per sample, `rows * columns * bands` bits; three planes hold
//! three times that, terminator included.
//!
//! Example: an 800x600 RGB image holds ~175 KB per plane.

use log::{info, warn};
use std::path::Path;

use crate::common::error::Result;
use crate::common::image_io;
use crate::common::pixels::PixelArray;
use crate::common::text_file;
use crate::processing::bit_plane::{capacity_bits, read_plane_after, write_plane, BitPlane, PlaneOrder};
use crate::processing::bits::BitSequence;
use crate::processing::report::{Completion, Diagnostic, EmbedReport, ExtractReport, PlaneUsage};
use crate::processing::text_bits;

/// An image carrying a message, and what it took to put it there.
#[derive(Debug, Clone)]
pub struct EmbedOutcome {
    pub pixels: PixelArray,
    pub report: EmbedReport,
}

/// A recovered message.
#[derive(Debug, Clone)]
pub struct ExtractOutcome {
    /// Message bytes, best-effort when no terminator was found
    pub text: Vec<u8>,
    /// The raw bits the text was decoded from
    pub bits: BitSequence,
    pub report: ExtractReport,
}

/// Bits three planes of `pixels` can hold.
pub fn total_capacity_bits(pixels: &PixelArray) -> usize {
    capacity_bits(pixels) * BitPlane::ALL.len()
}

/// Embed `text` into `pixels`, starting at plane `first`.
///
/// Never fails: a message too long for three planes is truncated and reported through
/// [`EmbedReport::diagnostic`].
pub fn embed_message(pixels: &PixelArray, text: &[u8], first: BitPlane) -> EmbedOutcome {
    let payload = text_bits::encode(text);
    let message_bits = payload.len();
    let capacity = capacity_bits(pixels);

    let mut order = PlaneOrder::starting_at(first);
    let mut image = pixels.clone();
    let mut remaining = payload;
    let mut planes = Vec::with_capacity(BitPlane::ALL.len());

    let completion = loop {
        let Some(plane) = order.next() else {
            break Completion::ExhaustedIncomplete;
        };

        info!(
            "Trying to fit {} remaining message bits in bit plane {}",
            remaining.len(),
            plane
        );
        let (next, rest) = write_plane(&image, &remaining, plane);
        image = next;

        match rest {
            None => {
                planes.push(PlaneUsage::new(plane, capacity, remaining.len()));
                info!("Message fits entirely in bit plane {}", plane);
                break Completion::Done;
            }
            Some(rest) => {
                planes.push(PlaneUsage::new(plane, capacity, remaining.len() - rest.len()));
                warn!(
                    "Message didn't fit entirely in bit plane {}, with {} message bits remaining",
                    plane,
                    rest.len()
                );
                remaining = rest;
            }
        }
    };

    let diagnostic = match completion {
        Completion::Done => None,
        Completion::ExhaustedIncomplete => {
            let diagnostic = Diagnostic::CapacityExceeded {
                unplaced_bits: remaining.len(),
            };
            warn!("{}", diagnostic);
            Some(diagnostic)
        }
    };

    EmbedOutcome {
        pixels: image,
        report: EmbedReport {
            message_bits,
            planes,
            completion,
            diagnostic,
        },
    }
}

/// Recover a message from `pixels`, reading planes in the order starting at `first`.
///
/// Never fails: without a terminator the bits of all three planes are decoded as they
/// are and [`ExtractReport::diagnostic`] says so.
pub fn extract_message(pixels: &PixelArray, first: BitPlane) -> ExtractOutcome {
    let capacity = capacity_bits(pixels);
    let mut order = PlaneOrder::starting_at(first);
    let mut message = BitSequence::new();
    let mut planes = Vec::with_capacity(BitPlane::ALL.len());

    let terminator_plane = loop {
        let Some(plane) = order.next() else {
            break None;
        };

        info!("Decoding bit plane {}", plane);
        // an unfinished byte from earlier planes continues into this one
        let carry = message.split_off(message.len() - message.partial_byte_len());
        let read = read_plane_after(pixels, plane, &carry);
        planes.push(PlaneUsage::new(
            plane,
            capacity,
            read.bits.len().saturating_sub(carry.len()),
        ));
        message.extend_from(&read.bits);

        if read.found_terminator() {
            info!("End of message found in bit plane {}", plane);
            break Some(plane);
        }
        info!("The message ending is not in bit plane {}", plane);
    };

    let (completion, diagnostic) = match terminator_plane {
        Some(_) => (Completion::Done, None),
        None => {
            let diagnostic = Diagnostic::SentinelNotFound;
            warn!("{}", diagnostic);
            (Completion::ExhaustedIncomplete, Some(diagnostic))
        }
    };

    ExtractOutcome {
        text: text_bits::decode(&message),
        report: ExtractReport {
            recovered_bits: message.len(),
            planes,
            terminator_plane,
            completion,
            diagnostic,
        },
        bits: message,
    }
}

/// Embed `text` into an in-memory image (any format supported by the `image` crate).
///
/// # Returns
/// - `Ok(Vec<u8>)`: PNG image bytes with embedded text
/// - `Err`: If the image can't be decoded or the result can't be encoded
///
/// # Example
/// ```ignore
/// let image_data = std::fs::read("input.png")?;
/// let carrier = embed_text_bytes(&image_data, b"Secret message", BitPlane::Zero)?;
/// std::fs::write("output.png", carrier)?;
/// ```
pub fn embed_text_bytes(image_bytes: &[u8], text: &[u8], first: BitPlane) -> Result<Vec<u8>> {
    let pixels = image_io::decode_pixels(image_bytes)?;
    let outcome = embed_message(&pixels, text, first);
    image_io::encode_png(&outcome.pixels)
}

/// Extract the text embedded in an in-memory image.
pub fn extract_text_bytes(image_bytes: &[u8], first: BitPlane) -> Result<Vec<u8>> {
    let pixels = image_io::decode_pixels(image_bytes)?;
    Ok(extract_message(&pixels, first).text)
}

/// Read `input_image` and `input_text`, embed, and write `output_image`.
///
/// The output image is written even when the message had to be truncated.
pub fn encode_file<P, Q, R>(
    input_image: P,
    input_text: Q,
    first: BitPlane,
    output_image: R,
) -> Result<EmbedReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    let pixels = image_io::load_pixels(input_image)?;
    let text = text_file::read_text(input_text)?;

    let outcome = embed_message(&pixels, &text, first);

    info!("Saving output image as {}", output_image.as_ref().display());
    image_io::save_pixels(output_image, &outcome.pixels)?;

    Ok(outcome.report)
}

/// Read `input_image`, extract its message, and write it to `output_text`.
pub fn decode_file<P, Q>(input_image: P, first: BitPlane, output_text: Q) -> Result<ExtractReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let pixels = image_io::load_pixels(input_image)?;

    let outcome = extract_message(&pixels, first);

    info!("Decoding ended - saving file in {}", output_text.as_ref().display());
    text_file::write_text(output_text, &outcome.text)?;

    Ok(outcome.report)
}
