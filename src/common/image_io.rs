//! # Image Collaborator
//!
//! Converts between files/bytes in any format the `image` crate understands and the
//! [`PixelArray`] the codec operates on. 8-bit gray, gray+alpha, RGB and RGBA images keep
//! their band count; deeper images are narrowed to 8-bit RGB or RGBA first.

use image::{DynamicImage, GenericImageView, GrayAlphaImage, GrayImage, ImageFormat, RgbImage, RgbaImage};
use log::{debug, warn};
use std::io::Cursor;
use std::path::Path;

use crate::common::error::{Result, StegoError};
use crate::common::pixels::PixelArray;

/// Read an image file into a pixel array.
pub fn load_pixels<P: AsRef<Path>>(path: P) -> Result<PixelArray> {
    let img = image::open(path.as_ref())?;
    debug!("Loaded {} as {:?}", path.as_ref().display(), img.color());
    to_pixels(img)
}

/// Decode an in-memory image (any supported format) into a pixel array.
pub fn decode_pixels(image_bytes: &[u8]) -> Result<PixelArray> {
    let img = image::load_from_memory(image_bytes)?;
    to_pixels(img)
}

/// Write a pixel array to `path`; the format follows the file extension.
///
/// Lossy formats are written anyway, with a warning, because they wipe the low bit
/// planes the message lives in.
pub fn save_pixels<P: AsRef<Path>>(path: P, pixels: &PixelArray) -> Result<()> {
    let path = path.as_ref();
    if is_lossy(path) {
        warn!(
            "{} uses a lossy format, the embedded message will not survive",
            path.display()
        );
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    to_dynamic(pixels)?.save(path)?;
    Ok(())
}

/// Encode a pixel array as PNG bytes.
pub fn encode_png(pixels: &PixelArray) -> Result<Vec<u8>> {
    let mut output_bytes = Vec::new();
    to_dynamic(pixels)?.write_to(&mut Cursor::new(&mut output_bytes), ImageFormat::Png)?;
    Ok(output_bytes)
}

fn to_pixels(img: DynamicImage) -> Result<PixelArray> {
    let (width, height) = img.dimensions();
    let (bands, samples) = match img {
        DynamicImage::ImageLuma8(buf) => (1, buf.into_raw()),
        DynamicImage::ImageLumaA8(buf) => (2, buf.into_raw()),
        DynamicImage::ImageRgb8(buf) => (3, buf.into_raw()),
        DynamicImage::ImageRgba8(buf) => (4, buf.into_raw()),
        other if other.color().has_alpha() => (4, other.to_rgba8().into_raw()),
        other => (3, other.to_rgb8().into_raw()),
    };
    PixelArray::new(height as usize, width as usize, bands, samples)
}

fn to_dynamic(pixels: &PixelArray) -> Result<DynamicImage> {
    let (rows, columns, bands) = pixels.shape();
    let too_large = || StegoError::UnsupportedLayout(format!("{}x{} image is too large", rows, columns));
    let width = u32::try_from(columns).map_err(|_| too_large())?;
    let height = u32::try_from(rows).map_err(|_| too_large())?;
    let raw = pixels.as_raw().to_vec();

    let img = match bands {
        1 => GrayImage::from_raw(width, height, raw).map(DynamicImage::ImageLuma8),
        2 => GrayAlphaImage::from_raw(width, height, raw).map(DynamicImage::ImageLumaA8),
        3 => RgbImage::from_raw(width, height, raw).map(DynamicImage::ImageRgb8),
        4 => RgbaImage::from_raw(width, height, raw).map(DynamicImage::ImageRgba8),
        n => {
            return Err(StegoError::UnsupportedLayout(format!(
                "{} bands per pixel",
                n
            )))
        }
    };

    img.ok_or_else(|| StegoError::UnsupportedLayout("sample buffer does not match dimensions".to_string()))
}

fn is_lossy(path: &Path) -> bool {
    matches!(ImageFormat::from_path(path), Ok(ImageFormat::Jpeg))
}
