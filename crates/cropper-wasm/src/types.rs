//! WASM-compatible wrapper types for image data and options.
//!
//! This module provides JavaScript-friendly types that wrap the core cropper
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use cropper_core::render::Surface;
use cropper_core::{CropperConfig, DecodedImage, InterpolationFilter};
use wasm_bindgen::prelude::*;

/// An RGBA image wrapper for JavaScript.
///
/// Used both for decoded sources and for rendered previews, so the pixel
/// buffer can be handed straight to `new ImageData(...)`.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create a new JsDecodedImage from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    pub(crate) fn from_surface(surface: Surface) -> Self {
        let (width, height) = (surface.width(), surface.height());
        Self {
            width,
            height,
            pixels: surface.into_pixels(),
        }
    }

    /// Convert back to a core DecodedImage. This clones the pixel data.
    ///
    /// Fails when the buffer length does not match the dimensions, which can
    /// only happen for images constructed from JavaScript.
    pub(crate) fn to_decoded(&self) -> Result<DecodedImage, JsValue> {
        let expected = self.width as usize * self.height as usize * 4;
        if self.pixels.len() != expected {
            return Err(JsValue::from_str(&format!(
                "Invalid pixel data: expected {} bytes, got {}",
                expected,
                self.pixels.len()
            )));
        }
        Ok(DecodedImage::new(
            self.width,
            self.height,
            self.pixels.clone(),
        ))
    }
}

/// Convert a u8 filter type value to the core InterpolationFilter enum.
///
/// Values:
/// - 0 = Nearest (fastest, blocky when magnified)
/// - 1 = Bilinear (the canvas default)
/// - 2 = Lanczos3 (sharpest, slowest)
///
/// Any other value defaults to Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> InterpolationFilter {
    match value {
        0 => InterpolationFilter::Nearest,
        2 => InterpolationFilter::Lanczos3,
        _ => InterpolationFilter::Bilinear, // Default
    }
}

/// Read a `CropperConfig` from an optional JS options object.
///
/// `undefined` and `null` give the defaults; missing fields fall back to
/// their defaults too.
pub(crate) fn config_from_js(value: JsValue) -> Result<CropperConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(CropperConfig::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}
