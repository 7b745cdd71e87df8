//! Cropper configuration.
//!
//! Every field has a default, so hosts only pass what they want to change:
//!
//! ```ignore
//! let config: CropperConfig = serde_wasm_bindgen::from_value(js_options)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::encode::ExportFormat;
use crate::geometry::INITIAL_CROP_PERCENT;
use crate::transform::{InterpolationFilter, TransformLimits};

/// Quiet period before the preview is redrawn.
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// Aspect ratio the toggle locks to.
pub const DEFAULT_ASPECT: f64 = 16.0 / 9.0;

pub const DEFAULT_DOWNLOAD_NAME: &str = "cropped.png";

/// Tunables for a [`crate::session::CropSession`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CropperConfig {
    pub debounce_ms: u64,
    /// Aspect ratio locked at start and restored by the toggle. `None` starts
    /// free-form, in which case the toggle locks to [`DEFAULT_ASPECT`].
    pub default_aspect: Option<f64>,
    /// Width of the initial centered crop, percent of the displayed width.
    pub initial_crop_percent: f64,
    /// Slider ranges for scale and rotation.
    pub limits: TransformLimits,
    pub filter: InterpolationFilter,
    pub export_format: ExportFormat,
    pub download_name: String,
}

impl Default for CropperConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            default_aspect: Some(DEFAULT_ASPECT),
            initial_crop_percent: INITIAL_CROP_PERCENT,
            limits: TransformLimits::default(),
            filter: InterpolationFilter::default(),
            export_format: ExportFormat::default(),
            download_name: DEFAULT_DOWNLOAD_NAME.to_string(),
        }
    }
}

impl CropperConfig {
    /// The ratio the aspect toggle locks to.
    pub fn toggle_aspect(&self) -> f64 {
        self.default_aspect
            .filter(|a| a.is_finite() && *a > 0.0)
            .unwrap_or(DEFAULT_ASPECT)
    }

    /// The aspect lock a session starts with.
    pub fn initial_aspect(&self) -> Option<f64> {
        self.default_aspect.map(|_| self.toggle_aspect())
    }

    /// Initial crop width, clamped to `(0, 100]`.
    pub fn initial_crop_percent(&self) -> f64 {
        if self.initial_crop_percent.is_finite() && self.initial_crop_percent > 0.0 {
            self.initial_crop_percent.min(100.0)
        } else {
            INITIAL_CROP_PERCENT
        }
    }
}
