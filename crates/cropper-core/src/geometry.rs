//! Crop rectangle geometry.
//!
//! Crops are tracked in two spaces:
//!
//! - [`Crop`] carries its own [`CropUnit`]. The interactive overlay works in
//!   percent of the displayed image so it survives layout changes.
//! - [`PixelCrop`] is the committed rectangle in displayed-image pixels, which
//!   the renderer maps onto natural pixels.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner of the displayed image
//! - x grows right, y grows down
//! - Percent values are relative to the media width (x, width) or height
//!   (y, height)

use serde::{Deserialize, Serialize};

/// Width of the initial aspect crop, in percent of the media width.
pub const INITIAL_CROP_PERCENT: f64 = 90.0;

/// Unit a [`Crop`] is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CropUnit {
    /// Percent of the displayed media size.
    #[default]
    #[serde(rename = "%")]
    Percent,
    /// Displayed-image pixels.
    #[serde(rename = "px")]
    Pixel,
}

/// A crop rectangle in either unit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Crop {
    /// Unit of all four coordinates.
    #[serde(default)]
    pub unit: CropUnit,
    /// Left edge.
    #[serde(default)]
    pub x: f64,
    /// Top edge.
    #[serde(default)]
    pub y: f64,
    /// Width, zero when it should be derived from the aspect ratio.
    #[serde(default)]
    pub width: f64,
    /// Height, zero when it should be derived from the aspect ratio.
    #[serde(default)]
    pub height: f64,
}

impl Crop {
    /// A percent crop at the origin with only a width set.
    pub fn percent_width(width: f64) -> Self {
        Self {
            unit: CropUnit::Percent,
            width,
            ..Self::default()
        }
    }

    /// Whether both dimensions are positive.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// A committed crop in displayed-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelCrop {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelCrop {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether both dimensions are positive. Rendering is skipped otherwise.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Clamp the rectangle into `[0, media_width] x [0, media_height]`.
    ///
    /// Non-finite or negative values collapse to zero, so the result always
    /// has non-negative dimensions that stay inside the media.
    pub fn clamp_to(self, media_width: f64, media_height: f64) -> Self {
        let sanitize = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        let media_width = sanitize(media_width);
        let media_height = sanitize(media_height);

        let x = sanitize(self.x).min(media_width);
        let y = sanitize(self.y).min(media_height);
        Self {
            x,
            y,
            width: sanitize(self.width).min(media_width - x),
            height: sanitize(self.height).min(media_height - y),
        }
    }

    /// View this rectangle as a pixel-unit [`Crop`].
    pub fn to_crop(self) -> Crop {
        Crop {
            unit: CropUnit::Pixel,
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

/// Convert any crop to displayed-image pixels.
pub fn convert_to_pixel_crop(crop: Crop, media_width: f64, media_height: f64) -> PixelCrop {
    match crop.unit {
        CropUnit::Pixel => PixelCrop::new(crop.x, crop.y, crop.width, crop.height),
        CropUnit::Percent => PixelCrop::new(
            crop.x / 100.0 * media_width,
            crop.y / 100.0 * media_height,
            crop.width / 100.0 * media_width,
            crop.height / 100.0 * media_height,
        ),
    }
}

/// Convert any crop to percent of the displayed media.
pub fn convert_to_percent_crop(crop: Crop, media_width: f64, media_height: f64) -> Crop {
    match crop.unit {
        CropUnit::Percent => crop,
        CropUnit::Pixel => Crop {
            unit: CropUnit::Percent,
            x: crop.x / media_width * 100.0,
            y: crop.y / media_height * 100.0,
            width: crop.width / media_width * 100.0,
            height: crop.height / media_height * 100.0,
        },
    }
}

fn in_unit(pixel: PixelCrop, unit: CropUnit, media_width: f64, media_height: f64) -> Crop {
    match unit {
        CropUnit::Pixel => pixel.to_crop(),
        CropUnit::Percent => convert_to_percent_crop(pixel.to_crop(), media_width, media_height),
    }
}

/// Constrain a crop to `aspect` (width / height).
///
/// The dimension that is set drives the other one; a crop with a width keeps
/// it and gets a derived height. If the result spills past the bottom or
/// right edge it is shrunk, keeping the ratio, until it fits. The result is
/// returned in the unit of the input.
pub fn make_aspect_crop(crop: Crop, aspect: f64, media_width: f64, media_height: f64) -> Crop {
    let mut px = convert_to_pixel_crop(crop, media_width, media_height);

    if crop.width > 0.0 {
        px.height = px.width / aspect;
    } else if crop.height > 0.0 {
        px.width = px.height * aspect;
    }

    if px.y + px.height > media_height {
        px.height = media_height - px.y;
        px.width = px.height * aspect;
    }

    if px.x + px.width > media_width {
        px.width = media_width - px.x;
        px.height = px.width / aspect;
    }

    in_unit(px, crop.unit, media_width, media_height)
}

/// Center a crop inside the media, keeping its size and unit.
pub fn center_crop(crop: Crop, media_width: f64, media_height: f64) -> Crop {
    let mut px = convert_to_pixel_crop(crop, media_width, media_height);
    px.x = (media_width - px.width) / 2.0;
    px.y = (media_height - px.height) / 2.0;
    in_unit(px, crop.unit, media_width, media_height)
}

/// The initial crop for a freshly displayed image.
///
/// Spans [`INITIAL_CROP_PERCENT`] of the width, or as much as fits with the
/// requested aspect ratio, and is centered on both axes. Callers only invoke
/// this once the image has positive dimensions.
pub fn center_aspect_crop(media_width: f64, media_height: f64, aspect: f64) -> Crop {
    centered_aspect_crop(media_width, media_height, aspect, INITIAL_CROP_PERCENT)
}

/// [`center_aspect_crop`] with a configurable starting width in percent.
pub fn centered_aspect_crop(
    media_width: f64,
    media_height: f64,
    aspect: f64,
    width_percent: f64,
) -> Crop {
    let crop = make_aspect_crop(
        Crop::percent_width(width_percent.clamp(0.0, 100.0)),
        aspect,
        media_width,
        media_height,
    );
    center_crop(crop, media_width, media_height)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
