//! Image decoding WASM bindings.
//!
//! These are the stateless entry points for hosts that keep their own state;
//! [`crate::ImageCropper`] decodes internally.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode encoded file bytes (PNG, JPEG, GIF, WebP, BMP)
//! - [`decode_data_url`] - Decode a base64 `data:` URL
//! - [`is_supported_image_type`] - The file picker's `image/*` filter
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@cropper/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::types::JsDecodedImage;
use cropper_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an image file from bytes.
///
/// EXIF orientation is applied, so the result is upright the way a browser
/// displays it.
///
/// # Errors
///
/// Returns an error if the format is not recognized or the data is corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode a `data:image/...;base64,` URL, as produced by
/// `FileReader.readAsDataURL`.
#[wasm_bindgen]
pub fn decode_data_url(url: &str) -> Result<JsDecodedImage, JsValue> {
    decode::decode_data_url(url)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Check whether a file's media type passes the `image/*` filter.
#[wasm_bindgen]
pub fn is_supported_image_type(mime: &str) -> bool {
    decode::is_supported_image_mime(mime)
}
