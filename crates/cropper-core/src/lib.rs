//! Cropper Core - crop preview pipeline
//!
//! This crate provides the target-independent part of the image cropper:
//! crop geometry, the debounced redraw scheduler, the CPU preview renderer,
//! image decoding and export encoding, tied together by [`session::CropSession`].
//! The browser bindings live in `cropper-wasm`.

pub mod config;
pub mod debounce;
pub mod decode;
pub mod download;
pub mod encode;
pub mod geometry;
pub mod render;
pub mod session;
pub mod transform;

pub use config::CropperConfig;
pub use debounce::{DebounceTicket, Debouncer};
pub use decode::{DecodeError, DecodedImage};
pub use download::{DownloadSlot, DownloadTarget};
pub use encode::{EncodeError, ExportBlob, ExportFormat};
pub use geometry::{center_aspect_crop, Crop, CropUnit, PixelCrop};
pub use render::{RenderParams, Surface};
pub use session::{CropSession, SessionPhase};
pub use transform::{InterpolationFilter, TransformState};

/// Errors surfaced by cropper operations.
#[derive(Debug, thiserror::Error)]
pub enum CropperError {
    /// Export was requested before any preview was rendered.
    #[error("No preview has been rendered yet")]
    PreviewMissing,

    /// Encoding the preview produced no bytes.
    #[error("Encoded image is empty")]
    EmptyBlob,

    /// The preview would exceed the largest surface a browser canvas allows.
    #[error("Preview surface too large: {width}x{height}")]
    SurfaceTooLarge { width: u32, height: u32 },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The host could not create the download URL or start the download.
    #[error("Download failed: {0}")]
    Download(String),
}
