//! Source sampling for the inverse-mapped renderer.
//!
//! Coordinates are continuous raster positions: pixel `(i, j)` covers
//! `[i, i + 1) x [j, j + 1)` and its center sits at `(i + 0.5, j + 0.5)`.
//! Positions outside the source are transparent, the way a canvas leaves
//! uncovered pixels untouched.

use crate::decode::DecodedImage;
use crate::transform::InterpolationFilter;

const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// Sample `image` at the continuous position `(x, y)`.
pub(crate) fn sample(image: &DecodedImage, x: f64, y: f64, filter: InterpolationFilter) -> [u8; 4] {
    if image.is_empty()
        || x < 0.0
        || y < 0.0
        || x >= f64::from(image.width)
        || y >= f64::from(image.height)
    {
        return TRANSPARENT;
    }

    match filter {
        InterpolationFilter::Nearest => sample_nearest(image, x, y),
        InterpolationFilter::Bilinear => sample_bilinear(image, x, y),
        InterpolationFilter::Lanczos3 => sample_lanczos3(image, x, y),
    }
}

#[inline]
fn pixel_f64(image: &DecodedImage, px: usize, py: usize) -> [f64; 4] {
    let p = image.pixel(px, py);
    [
        f64::from(p[0]),
        f64::from(p[1]),
        f64::from(p[2]),
        f64::from(p[3]),
    ]
}

#[inline]
fn to_u8(v: f64) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}

fn sample_nearest(image: &DecodedImage, x: f64, y: f64) -> [u8; 4] {
    image.pixel(x.floor() as usize, y.floor() as usize)
}

/// Bilinear interpolation between the four pixel centers around `(x, y)`.
///
/// Neighbours past the edge repeat the edge pixel, so the border of the
/// image keeps its color instead of fading out.
fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> [u8; 4] {
    let max_x = image.width as usize - 1;
    let max_y = image.height as usize - 1;

    // Shift to pixel-center space
    let u = (x - 0.5).max(0.0);
    let v = (y - 0.5).max(0.0);

    let x0 = (u.floor() as usize).min(max_x);
    let y0 = (v.floor() as usize).min(max_y);
    let x1 = (x0 + 1).min(max_x);
    let y1 = (y0 + 1).min(max_y);

    let fx = u - x0 as f64;
    let fy = v - y0 as f64;

    let p00 = pixel_f64(image, x0, y0);
    let p10 = pixel_f64(image, x1, y0);
    let p01 = pixel_f64(image, x0, y1);
    let p11 = pixel_f64(image, x1, y1);

    let mut result = [0u8; 4];
    for i in 0..4 {
        let value = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = to_u8(value);
    }
    result
}

/// Lanczos3 over a 6x6 neighbourhood, falling back to bilinear near edges.
fn sample_lanczos3(image: &DecodedImage, x: f64, y: f64) -> [u8; 4] {
    let (w, h) = (i64::from(image.width), i64::from(image.height));
    let u = x - 0.5;
    let v = y - 0.5;

    if u < 2.0 || u >= (w - 3) as f64 || v < 2.0 || v >= (h - 3) as f64 {
        return sample_bilinear(image, x, y);
    }

    let x0 = u.floor() as i64;
    let y0 = v.floor() as i64;

    let mut sum = [0.0f64; 4];
    let mut weight_sum = 0.0;

    for ky in -2..=3 {
        for kx in -2..=3 {
            let px = x0 + kx;
            let py = y0 + ky;
            let weight = lanczos_weight(u - px as f64, 3.0) * lanczos_weight(v - py as f64, 3.0);

            let pixel = pixel_f64(image, px as usize, py as usize);
            for i in 0..4 {
                sum[i] += pixel[i] * weight;
            }
            weight_sum += weight;
        }
    }

    let mut result = [0u8; 4];
    if weight_sum > 0.0 {
        for i in 0..4 {
            result[i] = to_u8(sum[i] / weight_sum);
        }
    }
    result
}

/// Lanczos kernel: `sinc(x) * sinc(x / a)` inside `|x| < a`, zero outside.
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;
    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}
