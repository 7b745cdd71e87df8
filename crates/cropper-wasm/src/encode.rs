//! Image encoding WASM bindings.
//!
//! Stateless export helpers for a rendered preview (or any RGBA image).
//!
//! # Example
//!
//! ```typescript
//! import { encode_png, encode_jpeg } from '@cropper/wasm';
//!
//! const png = encode_png(preview);
//! const jpeg = encode_jpeg(preview, 90);
//! ```

use crate::types::JsDecodedImage;
use cropper_core::encode;
use wasm_bindgen::prelude::*;

/// Encode an RGBA image to PNG bytes, keeping transparency.
///
/// # Errors
///
/// Returns an error if the pixel buffer does not match the dimensions or
/// either dimension is zero.
#[wasm_bindgen]
pub fn encode_png(image: &JsDecodedImage) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(&image.pixels(), image.width(), image.height())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode an RGBA image to JPEG bytes. Alpha is dropped.
///
/// # Arguments
///
/// * `image` - The image to encode
/// * `quality` - JPEG quality (1-100, out-of-range values are clamped)
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsDecodedImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(&image.pixels(), image.width(), image.height(), quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
