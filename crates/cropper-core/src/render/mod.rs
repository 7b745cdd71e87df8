//! Preview rendering.
//!
//! Reproduces what a 2D canvas does when the crop preview is drawn:
//!
//! ```text
//! canvas.width  = floor(crop.width  * ratio_x * dpr)
//! canvas.height = floor(crop.height * ratio_y * dpr)
//! ctx.scale(dpr, dpr)
//! ctx.translate(-crop_x, -crop_y)
//! ctx.translate(cx, cy); ctx.rotate(rad); ctx.translate(-cx, -cy)
//! ctx.translate(cx, cy); ctx.scale(s, s); ctx.translate(-cx, -cy)
//! ctx.drawImage(image, 0, 0)
//! ```
//!
//! `ratio` is natural over displayed size, `crop_x`/`crop_y` are the crop
//! origin in natural pixels and `(cx, cy)` is the natural image center.
//!
//! The CPU path evaluates that stack by inverse mapping: every destination
//! pixel center is pulled back through the inverted matrix and the source is
//! sampled there. The result is deterministic, so identical inputs always
//! yield identical pixels.

mod sample;

use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;
use crate::geometry::PixelCrop;
use crate::transform::{Affine, InterpolationFilter, TransformState};
use crate::CropperError;

/// Largest surface area browsers allow for a canvas backing store.
pub const MAX_SURFACE_PIXELS: u64 = 16_384 * 16_384;

/// Everything besides the source image that determines the preview.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderParams {
    /// Committed crop in displayed-image pixels.
    pub crop: PixelCrop,
    /// User scale and rotation.
    pub transform: TransformState,
    /// Oversampling factor for high-density displays.
    pub device_pixel_ratio: f64,
    /// Size the image is displayed at. `None` means natural size.
    pub display_size: Option<(f64, f64)>,
    pub filter: InterpolationFilter,
}

impl RenderParams {
    pub fn new(crop: PixelCrop, transform: TransformState) -> Self {
        Self {
            crop,
            transform,
            device_pixel_ratio: 1.0,
            display_size: None,
            filter: InterpolationFilter::default(),
        }
    }

    fn dpr(&self) -> f64 {
        sanitize_dpr(self.device_pixel_ratio)
    }

    /// Natural pixels per displayed pixel on each axis.
    pub fn natural_ratio(&self, natural_width: u32, natural_height: u32) -> (f64, f64) {
        match self.display_size {
            Some((w, h)) if w > 0.0 && h > 0.0 && w.is_finite() && h.is_finite() => (
                f64::from(natural_width) / w,
                f64::from(natural_height) / h,
            ),
            _ => (1.0, 1.0),
        }
    }

    /// Pixel size of the target surface for a source of the given size.
    pub fn surface_size(&self, natural_width: u32, natural_height: u32) -> (u32, u32) {
        let (rx, ry) = self.natural_ratio(natural_width, natural_height);
        let dpr = self.dpr();
        (
            to_dimension(self.crop.width * rx * dpr),
            to_dimension(self.crop.height * ry * dpr),
        )
    }

    /// The full source-to-surface transform.
    pub fn transform_for(&self, natural_width: u32, natural_height: u32) -> Affine {
        let (rx, ry) = self.natural_ratio(natural_width, natural_height);
        let dpr = self.dpr();
        let crop_x = self.crop.x * rx;
        let crop_y = self.crop.y * ry;
        let cx = f64::from(natural_width) / 2.0;
        let cy = f64::from(natural_height) / 2.0;
        let scale = self.transform.scale;

        Affine::IDENTITY
            .scale(dpr, dpr)
            .translate(-crop_x, -crop_y)
            .translate(cx, cy)
            .rotate(self.transform.rotation_radians())
            .translate(-cx, -cy)
            .translate(cx, cy)
            .scale(scale, scale)
            .translate(-cx, -cy)
    }
}

fn sanitize_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr
    } else {
        1.0
    }
}

fn to_dimension(v: f64) -> u32 {
    if v.is_finite() && v > 0.0 {
        // Saturating cast
        v.floor() as u32
    } else {
        0
    }
}

/// Byte length of an RGBA buffer, refusing areas above [`MAX_SURFACE_PIXELS`].
fn buffer_len(width: u32, height: u32) -> Result<usize, CropperError> {
    let too_large = || CropperError::SurfaceTooLarge { width, height };
    if u64::from(width) * u64::from(height) > MAX_SURFACE_PIXELS {
        return Err(too_large());
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(too_large)
}

/// The rendered preview: an RGBA pixel buffer, like a canvas backing store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    /// A transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> Result<Self, CropperError> {
        let mut surface = Self::default();
        surface.reset(width, height)?;
        Ok(surface)
    }

    /// Resize and clear to transparent, as assigning `canvas.width` does.
    ///
    /// An oversized request leaves the surface untouched.
    pub fn reset(&mut self, width: u32, height: u32) -> Result<(), CropperError> {
        let len = buffer_len(width, height)?;
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(len, 0);
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// RGBA value at (x, y), `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels
            .get(idx..idx + 4)
            .and_then(|p| p.try_into().ok())
    }
}

/// Draw the cropped, transformed source onto `surface`.
///
/// The surface is resized to the crop (times ratio and device pixel ratio)
/// and cleared first. A zero-area crop leaves an empty surface; callers are
/// expected to skip rendering in that case.
///
/// # Errors
///
/// [`CropperError::SurfaceTooLarge`] when the surface would exceed
/// [`MAX_SURFACE_PIXELS`]. `surface` is not modified then.
pub fn render_into(
    image: &DecodedImage,
    surface: &mut Surface,
    params: &RenderParams,
) -> Result<(), CropperError> {
    let (width, height) = params.surface_size(image.width, image.height);
    surface.reset(width, height)?;

    if surface.is_empty() || image.is_empty() {
        return Ok(());
    }

    let Some(inverse) = params.transform_for(image.width, image.height).inverse() else {
        return Ok(());
    };

    let row_bytes = width as usize * 4;
    for (y, row) in surface.pixels.chunks_exact_mut(row_bytes).enumerate() {
        let dy = y as f64 + 0.5;
        for (x, out) in row.chunks_exact_mut(4).enumerate() {
            let (sx, sy) = inverse.apply(x as f64 + 0.5, dy);
            out.copy_from_slice(&sample::sample(image, sx, sy, params.filter));
        }
    }
    Ok(())
}

/// Render into a fresh surface.
pub fn render_preview(image: &DecodedImage, params: &RenderParams) -> Result<Surface, CropperError> {
    let mut surface = Surface::default();
    render_into(image, &mut surface, params)?;
    Ok(surface)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// R = x, G = y, opaque.
    fn gradient(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, 0, 255]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    /// Four solid quadrants: red, green / blue, white.
    fn quadrants(size: u32) -> DecodedImage {
        let half = size / 2;
        let mut pixels = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let color = match (x < half, y < half) {
                    (true, true) => [255, 0, 0, 255],
                    (false, true) => [0, 255, 0, 255],
                    (true, false) => [0, 0, 255, 255],
                    (false, false) => [255, 255, 255, 255],
                };
                pixels.extend_from_slice(&color);
            }
        }
        DecodedImage::new(size, size, pixels)
    }

    fn params(crop: PixelCrop, scale: f64, rotation: i32) -> RenderParams {
        RenderParams::new(crop, TransformState { scale, rotation })
    }

    fn red(surface: &Surface, x: u32, y: u32) -> u8 {
        surface.pixel(x, y).unwrap()[0]
    }

    fn green(surface: &Surface, x: u32, y: u32) -> u8 {
        surface.pixel(x, y).unwrap()[1]
    }

    #[test]
    fn test_identity_render_copies_crop_region() {
        let img = gradient(100, 80);
        let p = params(PixelCrop::new(10.0, 20.0, 30.0, 40.0), 1.0, 0);
        let surface = render_preview(&img, &p).unwrap();

        assert_eq!((surface.width(), surface.height()), (30, 40));
        assert_eq!(surface.pixel(0, 0), Some([10, 20, 0, 255]));
        assert_eq!(surface.pixel(29, 39), Some([39, 59, 0, 255]));
    }

    #[test]
    fn test_surface_size_uses_device_pixel_ratio() {
        let img = gradient(200, 200);
        let mut p = params(PixelCrop::new(50.0, 50.0, 100.0, 100.0), 1.0, 0);
        p.device_pixel_ratio = 2.0;
        let surface = render_preview(&img, &p).unwrap();

        assert_eq!((surface.width(), surface.height()), (200, 200));
        // Device pixel (2x, 2y) still shows crop pixel (x, y)
        assert_eq!(red(&surface, 20, 0), 60);
    }

    #[test]
    fn test_invalid_device_pixel_ratio_falls_back_to_one() {
        let img = gradient(50, 50);
        let mut p = params(PixelCrop::new(0.0, 0.0, 10.0, 10.0), 1.0, 0);
        p.device_pixel_ratio = 0.0;
        assert_eq!(p.surface_size(50, 50), (10, 10));
        p.device_pixel_ratio = f64::NAN;
        assert_eq!(render_preview(&img, &p).unwrap().width(), 10);
    }

    #[test]
    fn test_display_ratio_maps_to_natural_pixels() {
        let img = gradient(200, 200);

        // Image displayed at half size; crop in displayed pixels
        let mut scaled = params(PixelCrop::new(25.0, 25.0, 50.0, 50.0), 1.0, 0);
        scaled.display_size = Some((100.0, 100.0));
        let natural = params(PixelCrop::new(50.0, 50.0, 100.0, 100.0), 1.0, 0);

        let a = render_preview(&img, &scaled).unwrap();
        let b = render_preview(&img, &natural).unwrap();
        assert_eq!((a.width(), a.height()), (100, 100));
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_area_crop_renders_nothing() {
        let img = gradient(10, 10);
        let surface = render_preview(&img, &params(PixelCrop::new(0.0, 0.0, 0.0, 5.0), 1.0, 0)).unwrap();
        assert!(surface.is_empty());
        assert!(surface.pixels().is_empty());
    }

    #[test]
    fn test_render_is_idempotent() {
        let img = quadrants(64);
        let p = params(PixelCrop::new(5.0, 7.0, 40.0, 30.0), 1.7, -33);

        let first = render_preview(&img, &p).unwrap();
        let second = render_preview(&img, &p).unwrap();
        assert_eq!(first, second);

        // Re-rendering into a used surface gives the same pixels
        let mut reused = render_preview(&img, &params(PixelCrop::new(0.0, 0.0, 64.0, 64.0), 3.0, 90)).unwrap();
        render_into(&img, &mut reused, &p).unwrap();
        assert_eq!(reused, first);
    }

    #[test]
    fn test_rotation_turns_content_clockwise() {
        let img = quadrants(200);
        let crop = PixelCrop::new(50.0, 50.0, 100.0, 100.0);

        let plain = render_preview(&img, &params(crop, 1.0, 0)).unwrap();
        let rotated = render_preview(&img, &params(crop, 1.0, 90)).unwrap();

        // Unrotated: top-right shows the green quadrant
        assert_eq!(plain.pixel(75, 25), Some([0, 255, 0, 255]));
        // Rotated 90 clockwise: red (top-left) moves to top-right
        assert_eq!(rotated.pixel(75, 25), Some([255, 0, 0, 255]));
        // and blue (bottom-left) moves to top-left
        assert_eq!(rotated.pixel(25, 25), Some([0, 0, 255, 255]));
    }

    #[test]
    fn test_scale_magnifies_about_center() {
        let img = gradient(200, 200);
        let crop = PixelCrop::new(50.0, 50.0, 100.0, 100.0);

        let plain = render_preview(&img, &params(crop, 1.0, 0)).unwrap();
        let zoomed = render_preview(&img, &params(crop, 2.0, 0)).unwrap();

        // Unscaled: one source pixel per output pixel
        assert_eq!(i32::from(red(&plain, 40, 0)) - i32::from(red(&plain, 20, 0)), 20);
        // Scaled 2x: half a source pixel per output pixel
        assert_eq!(i32::from(red(&zoomed, 40, 0)) - i32::from(red(&zoomed, 20, 0)), 10);
        // The image center stays put
        assert_eq!(red(&zoomed, 50, 50), red(&plain, 50, 50));
    }

    #[test]
    fn test_scale_two_rotate_ninety_scenario() {
        let img = gradient(200, 200);
        let crop = PixelCrop::new(50.0, 50.0, 100.0, 100.0);

        for dpr in [1.0, 2.0] {
            let mut p = params(crop, 2.0, 90);
            p.device_pixel_ratio = dpr;
            let surface = render_preview(&img, &p).unwrap();
            let expected = (100.0 * dpr) as u32;
            assert_eq!((surface.width(), surface.height()), (expected, expected));
        }

        let surface = render_preview(&img, &params(crop, 2.0, 90)).unwrap();

        // Source x now runs down the rows, source y runs right to left
        assert_eq!(red(&surface, 10, 20), red(&surface, 60, 20));
        assert_eq!(i32::from(red(&surface, 10, 40)) - i32::from(red(&surface, 10, 20)), 10);
        assert_eq!(i32::from(green(&surface, 20, 10)) - i32::from(green(&surface, 40, 10)), 10);
    }

    #[test]
    fn test_small_scale_leaves_transparent_border() {
        let img = quadrants(100);
        let p = params(PixelCrop::new(0.0, 0.0, 100.0, 100.0), 0.5, 0);
        let surface = render_preview(&img, &p).unwrap();

        assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(30, 30), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_huge_device_pixel_ratio_is_rejected() {
        let img = gradient(10, 10);
        let mut p = params(PixelCrop::new(0.0, 0.0, 10.0, 10.0), 1.0, 0);
        p.device_pixel_ratio = 1e9;
        assert_eq!(p.surface_size(10, 10), (u32::MAX, u32::MAX));

        assert!(matches!(
            render_preview(&img, &p),
            Err(CropperError::SurfaceTooLarge {
                width: u32::MAX,
                height: u32::MAX
            })
        ));

        // The previous contents survive a rejected render
        let mut surface = render_preview(&img, &params(PixelCrop::new(0.0, 0.0, 4.0, 4.0), 1.0, 0)).unwrap();
        let before = surface.clone();
        assert!(render_into(&img, &mut surface, &p).is_err());
        assert_eq!(surface, before);
    }

    #[test]
    fn test_surface_area_limit() {
        assert_eq!(Surface::new(16_384, 2).unwrap().pixels().len(), 16_384 * 2 * 4);
        assert!(matches!(
            Surface::new(16_385, 16_384),
            Err(CropperError::SurfaceTooLarge { .. })
        ));
        assert!(Surface::new(u32::MAX, u32::MAX).is_err());
    }

    #[test]
    fn test_surface_pixel_out_of_bounds() {
        let surface = Surface::new(2, 2).unwrap();
        assert_eq!(surface.pixel(1, 1), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(2, 0), None);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
