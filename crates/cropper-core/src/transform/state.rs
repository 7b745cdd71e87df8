//! Scale and rotation state with clamping.

use serde::{Deserialize, Serialize};

pub const SCALE_MIN: f64 = 0.1;
pub const SCALE_MAX: f64 = 10.0;
pub const SCALE_DEFAULT: f64 = 1.0;
pub const ROTATION_MIN: i32 = -180;
pub const ROTATION_MAX: i32 = 180;
pub const ROTATION_DEFAULT: i32 = 0;

/// Slider ranges for scale and rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransformLimits {
    pub scale_min: f64,
    pub scale_max: f64,
    pub rotation_min: i32,
    pub rotation_max: i32,
}

impl Default for TransformLimits {
    fn default() -> Self {
        Self {
            scale_min: SCALE_MIN,
            scale_max: SCALE_MAX,
            rotation_min: ROTATION_MIN,
            rotation_max: ROTATION_MAX,
        }
    }
}

impl TransformLimits {
    /// Clamp a slider value into the scale range.
    ///
    /// Non-finite input resets to [`SCALE_DEFAULT`] (itself clamped, in case
    /// the range excludes it).
    pub fn clamp_scale(&self, value: f64) -> f64 {
        let (lo, hi) = ordered(self.scale_min, self.scale_max);
        if value.is_finite() {
            value.clamp(lo, hi)
        } else {
            SCALE_DEFAULT.clamp(lo, hi)
        }
    }

    /// Round a slider value to whole degrees and clamp it into range.
    pub fn clamp_rotation(&self, value: f64) -> i32 {
        let (lo, hi) = ordered(self.rotation_min, self.rotation_max);
        if !value.is_finite() {
            return ROTATION_DEFAULT.clamp(lo, hi);
        }
        // The cast saturates, so huge inputs land on the bounds
        (value.round() as i32).clamp(lo, hi)
    }
}

fn ordered<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// User-controlled scale and rotation applied to the preview.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    /// Uniform scale factor.
    pub scale: f64,
    /// Rotation in whole degrees, positive is clockwise.
    pub rotation: i32,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            scale: SCALE_DEFAULT,
            rotation: ROTATION_DEFAULT,
        }
    }
}

impl TransformState {
    /// Check if both values are at their defaults.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    pub fn rotation_radians(&self) -> f64 {
        f64::from(self.rotation).to_radians()
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
