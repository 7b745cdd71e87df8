//! WASM bindings for crop geometry and preview rendering.
//!
//! Stateless counterparts of what [`crate::ImageCropper`] does on every
//! debounced redraw, for hosts that manage state themselves.

use crate::types::{filter_from_u8, JsDecodedImage};
use cropper_core::geometry::{self, PixelCrop};
use cropper_core::render::{render_preview as core_render, RenderParams};
use cropper_core::{CropperError, TransformState};
use wasm_bindgen::prelude::*;

/// Compute the initial centered crop for a displayed image.
///
/// Returns a percent crop object (`{ unit: "%", x, y, width, height }`)
/// spanning 90% of the width, or as much as fits at `aspect`.
///
/// # Example (TypeScript)
///
/// ```typescript
/// img.onload = () => setCrop(center_aspect_crop(img.width, img.height, 16 / 9));
/// ```
#[wasm_bindgen]
pub fn center_aspect_crop(
    media_width: f64,
    media_height: f64,
    aspect: f64,
) -> Result<JsValue, JsValue> {
    if !(media_width > 0.0 && media_height > 0.0 && aspect > 0.0) {
        return Err(JsValue::from_str("Media size and aspect must be positive"));
    }
    let crop = geometry::center_aspect_crop(media_width, media_height, aspect);
    serde_wasm_bindgen::to_value(&crop).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render the cropped, scaled and rotated preview of `image`.
///
/// # Arguments
///
/// * `image` - Source image at natural size
/// * `crop` - Pixel crop object `{ x, y, width, height }` in displayed pixels
/// * `display_width` / `display_height` - Size the image is displayed at
/// * `scale` - Uniform scale about the image center
/// * `rotation` - Degrees, positive is clockwise
/// * `device_pixel_ratio` - Oversampling factor
/// * `filter` - 0 = nearest, 1 = bilinear, 2 = Lanczos3
///
/// # Returns
///
/// The preview as an RGBA image of `floor(crop * ratio * dpr)` pixels. Fails
/// when that exceeds the browser canvas limit.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn render_preview(
    image: &JsDecodedImage,
    crop: JsValue,
    display_width: f64,
    display_height: f64,
    scale: f64,
    rotation: i32,
    device_pixel_ratio: f64,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    let crop: PixelCrop =
        serde_wasm_bindgen::from_value(crop).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let source = image.to_decoded()?;

    let params = RenderParams {
        crop,
        transform: TransformState { scale, rotation },
        device_pixel_ratio,
        display_size: Some((display_width, display_height)),
        filter: filter_from_u8(filter),
    };
    render_params(&source, &params).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn render_params(
    source: &cropper_core::DecodedImage,
    params: &RenderParams,
) -> Result<JsDecodedImage, CropperError> {
    core_render(source, params).map(JsDecodedImage::from_surface)
}
