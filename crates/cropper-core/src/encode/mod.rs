//! Export encoding.
//!
//! Turns a rendered preview [`Surface`] into the bytes of a downloadable
//! file. PNG is the default (it is what `canvas.toBlob()` produces without a
//! type argument); JPEG is available with a quality setting.
//!
//! # Examples
//!
//! ```ignore
//! use cropper_core::encode::{encode_surface, ExportFormat};
//!
//! let blob = encode_surface(&surface, ExportFormat::default())?;
//! assert_eq!(blob.mime, "image/png");
//! ```

mod jpeg;
mod png;

use serde::{Deserialize, Serialize};

use crate::render::Surface;

pub use jpeg::encode_jpeg;
pub use png::encode_png;

/// Errors that can occur during encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Validate an RGBA buffer against its dimensions.
pub(crate) fn check_rgba_len(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    let expected = (width as usize) * (height as usize) * 4;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

/// File format used when exporting the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg {
        /// 1-100, clamped when encoding.
        quality: u8,
    },
}

impl ExportFormat {
    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg { .. } => "image/jpeg",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg { .. } => "jpg",
        }
    }
}

/// Encoded file bytes plus their media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBlob {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ExportBlob {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Encode a rendered surface into an export blob.
pub fn encode_surface(surface: &Surface, format: ExportFormat) -> Result<ExportBlob, EncodeError> {
    let (width, height) = (surface.width(), surface.height());
    let bytes = match format {
        ExportFormat::Png => encode_png(surface.pixels(), width, height)?,
        ExportFormat::Jpeg { quality } => encode_jpeg(surface.pixels(), width, height, quality)?,
    };
    log::debug!(
        "Encoded {}x{} surface as {} ({} bytes)",
        width,
        height,
        format.mime(),
        bytes.len()
    );
    Ok(ExportBlob {
        mime: format.mime().to_string(),
        bytes,
    })
}
