//! # Error Types
//!
//! Hard failures of the steganography pipeline. Running out of bit planes while
//! embedding or extracting is not an error: those conditions are reported as
//! [`Diagnostic`](crate::processing::report::Diagnostic)s on the outcome.

use thiserror::Error;

/// Errors that abort an encode or decode run.
#[derive(Error, Debug)]
pub enum StegoError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid bit plane '{0}': expected one of 0, 1, 2")]
    InvalidPlane(String),

    #[error("text is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("pixel buffer holds {actual} samples, {rows}x{columns}x{bands} needs {expected}")]
    ShapeMismatch {
        rows: usize,
        columns: usize,
        bands: usize,
        expected: usize,
        actual: usize,
    },

    #[error("unsupported image layout: {0}")]
    UnsupportedLayout(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StegoError>;
