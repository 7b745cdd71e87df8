//! Preview transforms: the affine matrix, user scale/rotation and sampling
//! filter.
//!
//! # Transform Order
//!
//! The preview draws the source under this stack, outermost first:
//! 1. Device pixel ratio
//! 2. Crop offset (natural pixels)
//! 3. Rotation about the image center
//! 4. Scale about the image center
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise on screen
//! - Origin is the top-left corner, y grows down

mod affine;
mod state;

use serde::{Deserialize, Serialize};

pub use affine::Affine;
pub use state::{
    TransformLimits, TransformState, ROTATION_DEFAULT, ROTATION_MAX, ROTATION_MIN, SCALE_DEFAULT,
    SCALE_MAX, SCALE_MIN,
};

/// Interpolation filter used when sampling the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationFilter {
    /// Nearest neighbour, matches a canvas with smoothing disabled.
    Nearest,
    /// Bilinear interpolation, the canvas default.
    #[default]
    Bilinear,
    /// Lanczos3, sharper results for large magnification.
    Lanczos3,
}
