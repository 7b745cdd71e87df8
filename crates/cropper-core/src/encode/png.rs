//! PNG encoding for export, the format a canvas produces by default.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::{check_rgba_len, EncodeError};

/// Encode RGBA pixel data to PNG bytes, keeping the alpha channel.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for a zero width or height,
/// `EncodeError::InvalidPixelData` if the buffer length does not match,
/// and `EncodeError::EncodingFailed` if the encoder itself fails.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    check_rgba_len(pixels, width, height)?;

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
