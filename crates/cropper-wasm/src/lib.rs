//! Cropper WASM - WebAssembly bindings for the image cropper
//!
//! This crate exposes the cropper-core pipeline to JavaScript/TypeScript pages.
//!
//! # Module Structure
//!
//! - `cropper` - [`ImageCropper`], the interactive cropper bound to a preview canvas
//! - `types` - WASM-compatible wrapper types for image data and options
//! - `decode` - Stateless image decoding bindings
//! - `render` - Stateless crop geometry and preview rendering bindings
//! - `encode` - Stateless export encoding bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { ImageCropper } from '@cropper/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const cropper = new ImageCropper(previewCanvas);
//! cropper.select_file(file, (err, dataUrl) => { img.src = dataUrl; });
//! ```

use wasm_bindgen::prelude::*;

mod cropper;
mod decode;
mod download;
mod encode;
mod logger;
mod render;
mod types;

// Re-export public types
pub use cropper::ImageCropper;
pub use decode::{decode_data_url, decode_image, is_supported_image_type};
pub use encode::{encode_jpeg, encode_png};
pub use render::{center_aspect_crop, render_preview};
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    logger::init(level);
}

/// Raise or lower console logging at runtime.
///
/// Accepts `"off"`, `"error"`, `"warn"`, `"info"`, `"debug"` or `"trace"`.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = level
        .parse::<log::LevelFilter>()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    logger::init(filter);
    Ok(())
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
