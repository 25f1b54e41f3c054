//! # Pixel Arrays
//!
//! [`PixelArray`] is the raw sample grid the bit-plane codec works on: `rows x columns x
//! bands` unsigned 8-bit samples, stored row-major with bands varying fastest. That is
//! the same interleaved layout the `image` crate uses for its 8-bit buffers, so
//! conversion in [`image_io`](super::image_io) is a move of the raw vector.

use crate::common::error::{Result, StegoError};

/// A 3-D array of 8-bit samples with dimensions (rows, columns, bands).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelArray {
    rows: usize,
    columns: usize,
    bands: usize,
    samples: Vec<u8>,
}

impl PixelArray {
    /// Wrap an existing sample buffer.
    ///
    /// # Errors
    /// [`StegoError::ShapeMismatch`] if `samples.len() != rows * columns * bands`.
    pub fn new(rows: usize, columns: usize, bands: usize, samples: Vec<u8>) -> Result<Self> {
        let expected = rows * columns * bands;
        if samples.len() != expected {
            return Err(StegoError::ShapeMismatch {
                rows,
                columns,
                bands,
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self {
            rows,
            columns,
            bands,
            samples,
        })
    }

    /// An array with every sample set to `value`.
    pub fn filled(rows: usize, columns: usize, bands: usize, value: u8) -> Self {
        Self {
            rows,
            columns,
            bands,
            samples: vec![value; rows * columns * bands],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn bands(&self) -> usize {
        self.bands
    }

    /// `(rows, columns, bands)`
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.rows, self.columns, self.bands)
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample at `(row, column, band)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, column: usize, band: usize) -> Option<u8> {
        if row >= self.rows || column >= self.columns || band >= self.bands {
            return None;
        }
        self.samples
            .get((row * self.columns + column) * self.bands + band)
            .copied()
    }

    /// Samples in storage order.
    pub fn as_raw(&self) -> &[u8] {
        &self.samples
    }

    pub(crate) fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.samples
    }
}
