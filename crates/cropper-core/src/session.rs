//! The crop session: all mutable cropper state behind one owner.
//!
//! A [`CropSession`] maps control events (file selected, crop dragged, slider
//! moved, aspect toggled, download clicked) onto state updates and keeps the
//! preview surface in sync through a [`Debouncer`]. It never touches a clock
//! or a timer itself; operations that may schedule a redraw take the current
//! time and return a [`DebounceTicket`] for the host to arm a timer with.
//!
//! # Lifecycle
//!
//! ```text
//! Empty --load--> Loaded --image_displayed (aspect locked)--> Cropping
//!                   |                                            ^
//!                   +--------------- change_crop ----------------+
//! ```
//!
//! Loading another image returns to `Loaded` from any phase.

use crate::config::CropperConfig;
use crate::debounce::{DebounceTicket, Debouncer};
use crate::decode::{decode_data_url, decode_image, DecodedImage};
use crate::download::{DownloadSlot, DownloadTarget};
use crate::encode::encode_surface;
use crate::geometry::{centered_aspect_crop, convert_to_pixel_crop, Crop, PixelCrop};
use crate::render::{render_into, RenderParams, Surface};
use crate::transform::{TransformState, ROTATION_DEFAULT, SCALE_DEFAULT};
use crate::CropperError;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No image selected.
    Empty,
    /// An image is loaded but no crop rectangle exists yet.
    Loaded,
    /// A crop rectangle exists.
    Cropping,
}

/// Inputs the preview depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
struct RenderDeps {
    source: u64,
    crop: Option<PixelCrop>,
    scale: f64,
    rotation: i32,
}

/// Headless cropper controller.
#[derive(Debug)]
pub struct CropSession {
    config: CropperConfig,
    source: Option<DecodedImage>,
    /// Bumped on every load so a new image always counts as a change.
    source_id: u64,
    display_size: Option<(f64, f64)>,
    crop: Option<Crop>,
    completed: Option<PixelCrop>,
    transform: TransformState,
    aspect: Option<f64>,
    debouncer: Debouncer<RenderDeps>,
    preview: Option<Surface>,
    device_pixel_ratio: f64,
}

impl Default for CropSession {
    fn default() -> Self {
        Self::new(CropperConfig::default())
    }
}

impl CropSession {
    pub fn new(config: CropperConfig) -> Self {
        let transform = TransformState {
            scale: config.limits.clamp_scale(SCALE_DEFAULT),
            rotation: config.limits.clamp_rotation(f64::from(ROTATION_DEFAULT)),
        };
        Self {
            aspect: config.initial_aspect(),
            debouncer: Debouncer::new(config.debounce_ms),
            config,
            source: None,
            source_id: 0,
            display_size: None,
            crop: None,
            completed: None,
            transform,
            preview: None,
            device_pixel_ratio: 1.0,
        }
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Decode a `data:` URL (what `FileReader.readAsDataURL` yields) and make
    /// it the source image.
    pub fn load_data_url(&mut self, url: &str) -> Result<(), CropperError> {
        let image = decode_data_url(url)?;
        self.load_image(image);
        Ok(())
    }

    /// Decode encoded file bytes and make them the source image.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), CropperError> {
        let image = decode_image(bytes)?;
        self.load_image(image);
        Ok(())
    }

    /// Replace the source with an already decoded image.
    ///
    /// The crop, the committed crop and the preview are cleared and any
    /// pending redraw is dropped. Scale, rotation and the aspect lock carry
    /// over to the new image.
    pub fn load_image(&mut self, image: DecodedImage) {
        log::debug!("Loaded {}x{} source image", image.width, image.height);
        self.source = Some(image);
        self.source_id = self.source_id.wrapping_add(1);
        self.display_size = None;
        self.crop = None;
        self.completed = None;
        self.preview = None;
        self.debouncer.cancel();
    }

    /// Record the size the image is laid out at.
    ///
    /// With an aspect lock in place this computes the initial centered crop,
    /// which is also returned. Ignored without a source or with a
    /// non-positive size.
    pub fn image_displayed(&mut self, width: f64, height: f64) -> Option<Crop> {
        self.source.as_ref()?;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            log::warn!("Ignoring displayed size {}x{}", width, height);
            return None;
        }
        self.display_size = Some((width, height));

        let aspect = self.aspect?;
        let crop = centered_aspect_crop(width, height, aspect, self.config.initial_crop_percent());
        log::debug!("Initial crop {:?} for {}x{}", crop, width, height);
        self.crop = Some(crop);
        Some(crop)
    }

    // ------------------------------------------------------------------
    // Control events
    // ------------------------------------------------------------------

    /// Live overlay update while the user drags or resizes the crop.
    pub fn change_crop(&mut self, crop: Crop) {
        if self.source.is_some() {
            self.crop = Some(crop);
        }
    }

    /// Commit the crop the overlay reported at the end of an interaction.
    ///
    /// The rectangle is clamped to the displayed image (the natural size when
    /// the displayed size is unknown).
    pub fn complete_crop(&mut self, crop: PixelCrop, now_ms: u64) -> Option<DebounceTicket> {
        let (width, height) = self.media_size()?;
        self.completed = Some(crop.clamp_to(width, height));
        self.schedule_render(now_ms)
    }

    pub fn set_scale(&mut self, value: f64, now_ms: u64) -> Option<DebounceTicket> {
        self.transform.scale = self.config.limits.clamp_scale(value);
        self.schedule_render(now_ms)
    }

    pub fn set_rotation(&mut self, degrees: f64, now_ms: u64) -> Option<DebounceTicket> {
        self.transform.rotation = self.config.limits.clamp_rotation(degrees);
        self.schedule_render(now_ms)
    }

    pub fn reset_scale(&mut self, now_ms: u64) -> Option<DebounceTicket> {
        self.set_scale(SCALE_DEFAULT, now_ms)
    }

    pub fn reset_rotation(&mut self, now_ms: u64) -> Option<DebounceTicket> {
        self.set_rotation(f64::from(ROTATION_DEFAULT), now_ms)
    }

    /// Flip the aspect lock.
    ///
    /// Unlocking leaves the crop as it is. Locking only happens while an
    /// image is displayed; it replaces both the live and committed crop with a
    /// fresh centered one and schedules a redraw.
    pub fn toggle_aspect(&mut self, now_ms: u64) -> Option<DebounceTicket> {
        if self.aspect.take().is_some() {
            log::debug!("Aspect lock released");
            return None;
        }

        let (width, height) = self.display_size?;
        let aspect = self.config.toggle_aspect();
        self.aspect = Some(aspect);
        log::debug!("Aspect locked to {:.4}", aspect);

        let crop = centered_aspect_crop(width, height, aspect, self.config.initial_crop_percent());
        self.crop = Some(crop);
        self.completed = Some(convert_to_pixel_crop(crop, width, height).clamp_to(width, height));
        self.schedule_render(now_ms)
    }

    pub fn set_device_pixel_ratio(&mut self, dpr: f64) {
        self.device_pixel_ratio = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    }

    // ------------------------------------------------------------------
    // Debounced rendering
    // ------------------------------------------------------------------

    fn render_deps(&self) -> RenderDeps {
        RenderDeps {
            source: self.source_id,
            crop: self.completed,
            scale: self.transform.scale,
            rotation: self.transform.rotation,
        }
    }

    fn schedule_render(&mut self, now_ms: u64) -> Option<DebounceTicket> {
        self.source.as_ref()?;
        let ticket = self.debouncer.track(self.render_deps(), now_ms);
        if let Some(ticket) = ticket {
            log::debug!("Preview redraw due at {}ms", ticket.deadline_ms());
        }
        ticket
    }

    /// Run the redraw for a ticket whose timer expired.
    ///
    /// Returns `Ok(true)` when the preview was redrawn and `Ok(false)` for a
    /// stale ticket or when there is nothing to draw.
    pub fn fire_render(&mut self, ticket: DebounceTicket) -> Result<bool, CropperError> {
        match self.debouncer.fire(ticket) {
            Some(deps) => self.render(deps),
            None => Ok(false),
        }
    }

    /// Run the pending redraw if its deadline has passed.
    pub fn poll_render(&mut self, now_ms: u64) -> Result<bool, CropperError> {
        match self.debouncer.poll(now_ms) {
            Some(deps) => self.render(deps),
            None => Ok(false),
        }
    }

    /// Drop the pending redraw (teardown).
    pub fn cancel_render(&mut self) {
        self.debouncer.cancel();
    }

    pub fn pending_render(&self) -> Option<DebounceTicket> {
        self.debouncer.pending()
    }

    fn render(&mut self, deps: RenderDeps) -> Result<bool, CropperError> {
        let Some(image) = self.source.as_ref() else {
            return Ok(false);
        };
        let Some(crop) = deps.crop.filter(PixelCrop::has_area) else {
            return Ok(false);
        };
        if deps.source != self.source_id {
            return Ok(false);
        }

        let params = RenderParams {
            crop,
            transform: TransformState {
                scale: deps.scale,
                rotation: deps.rotation,
            },
            device_pixel_ratio: self.device_pixel_ratio,
            display_size: self.display_size,
            filter: self.config.filter,
        };

        // A failed render leaves no preview behind
        let mut surface: Surface = self.preview.take().unwrap_or_default();
        render_into(image, &mut surface, &params)?;
        log::debug!(
            "Rendered {}x{} preview (scale {}, rotation {})",
            surface.width(),
            surface.height(),
            deps.scale,
            deps.rotation
        );
        self.preview = Some(surface);
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Encode the preview and download it through `slot`.
    ///
    /// Returns the temporary URL the download was started from. The URL of a
    /// previous export is revoked first.
    pub fn export<T: DownloadTarget>(
        &self,
        slot: &mut DownloadSlot<T>,
    ) -> Result<String, CropperError> {
        let surface = self
            .preview
            .as_ref()
            .filter(|s| !s.is_empty())
            .ok_or(CropperError::PreviewMissing)?;

        let blob = encode_surface(surface, self.config.export_format)?;
        if blob.is_empty() {
            return Err(CropperError::EmptyBlob);
        }
        slot.publish(&blob, &self.config.download_name)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn phase(&self) -> SessionPhase {
        match (&self.source, &self.crop) {
            (None, _) => SessionPhase::Empty,
            (Some(_), None) => SessionPhase::Loaded,
            (Some(_), Some(_)) => SessionPhase::Cropping,
        }
    }

    /// Sliders and the aspect toggle are enabled once an image is selected.
    pub fn controls_enabled(&self) -> bool {
        self.source.is_some()
    }

    /// The download button is shown once a crop with area is committed.
    pub fn can_download(&self) -> bool {
        self.completed.is_some_and(|c| c.has_area())
    }

    /// CSS size of the preview canvas: the committed crop size.
    pub fn preview_css_size(&self) -> Option<(f64, f64)> {
        self.completed
            .filter(PixelCrop::has_area)
            .map(|c| (c.width, c.height))
    }

    /// Displayed size if known, otherwise the natural size.
    fn media_size(&self) -> Option<(f64, f64)> {
        let image = self.source.as_ref()?;
        Some(
            self.display_size
                .unwrap_or((f64::from(image.width), f64::from(image.height))),
        )
    }

    pub fn config(&self) -> &CropperConfig {
        &self.config
    }

    pub fn source(&self) -> Option<&DecodedImage> {
        self.source.as_ref()
    }

    pub fn display_size(&self) -> Option<(f64, f64)> {
        self.display_size
    }

    pub fn crop(&self) -> Option<Crop> {
        self.crop
    }

    pub fn completed_crop(&self) -> Option<PixelCrop> {
        self.completed
    }

    pub fn transform(&self) -> TransformState {
        self.transform
    }

    pub fn aspect(&self) -> Option<f64> {
        self.aspect
    }

    pub fn preview(&self) -> Option<&Surface> {
        self.preview.as_ref()
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::tests::RecordingTarget;
    use crate::geometry::CropUnit;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

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

    fn loaded(width: u32, height: u32) -> CropSession {
        let mut session = CropSession::default();
        session.load_image(gradient(width, height));
        session
    }

    #[test]
    fn test_starts_empty() {
        let session = CropSession::default();
        assert_eq!(session.phase(), SessionPhase::Empty);
        assert!(!session.controls_enabled());
        assert!(!session.can_download());
        assert_eq!(session.aspect(), Some(16.0 / 9.0));
        assert!(session.transform().is_identity());
    }

    #[test]
    fn test_events_without_image_are_ignored() {
        let mut session = CropSession::default();
        assert!(session.image_displayed(100.0, 100.0).is_none());
        session.change_crop(Crop::percent_width(50.0));
        assert!(session.crop().is_none());
        assert!(session.complete_crop(PixelCrop::new(0.0, 0.0, 10.0, 10.0), 0).is_none());
        assert!(session.set_scale(2.0, 0).is_none());
        assert!(session.toggle_aspect(0).is_none());
        assert!(!session.poll_render(1_000).unwrap());
    }

    #[test]
    fn test_full_hd_initial_crop() {
        let mut session = loaded(192, 108);
        assert_eq!(session.phase(), SessionPhase::Loaded);

        let crop = session.image_displayed(1920.0, 1080.0).unwrap();
        assert_eq!(crop.unit, CropUnit::Percent);
        assert!(approx(crop.width, 90.0));
        assert!(approx(crop.height, 90.0));
        assert!(approx(crop.x, 5.0));
        assert!(approx(crop.y, 5.0));
        assert_eq!(session.phase(), SessionPhase::Cropping);
        assert!(session.completed_crop().is_none());
    }

    #[test]
    fn test_free_form_display_sets_no_crop() {
        let mut session = CropSession::new(CropperConfig {
            default_aspect: None,
            ..Default::default()
        });
        session.load_image(gradient(10, 10));
        assert!(session.image_displayed(10.0, 10.0).is_none());
        assert_eq!(session.phase(), SessionPhase::Loaded);
        assert_eq!(session.display_size(), Some((10.0, 10.0)));
    }

    #[test]
    fn test_toggle_off_then_on_recenters() {
        let mut session = loaded(192, 108);
        session.image_displayed(1920.0, 1080.0);

        // User drags to a free-form crop after unlocking
        assert!(session.toggle_aspect(0).is_none());
        assert_eq!(session.aspect(), None);
        let dragged = Crop {
            unit: CropUnit::Percent,
            x: 10.0,
            y: 20.0,
            width: 30.0,
            height: 40.0,
        };
        session.change_crop(dragged);
        assert_eq!(session.crop(), Some(dragged));

        let ticket = session.toggle_aspect(500).unwrap();
        assert_eq!(session.aspect(), Some(16.0 / 9.0));
        assert_eq!(ticket.deadline_ms(), 600);

        let crop = session.crop().unwrap();
        assert!(approx(crop.x, 5.0) && approx(crop.y, 5.0));
        assert!(approx(crop.width, 90.0) && approx(crop.height, 90.0));

        let committed = session.completed_crop().unwrap();
        assert!(approx(committed.x, 96.0));
        assert!(approx(committed.y, 54.0));
        assert!(approx(committed.width, 1728.0));
        assert!(approx(committed.height, 972.0));
        assert!(approx(committed.width / committed.height, 16.0 / 9.0));
    }

    #[test]
    fn test_unlock_keeps_crop() {
        let mut session = loaded(160, 90);
        let crop = session.image_displayed(160.0, 90.0).unwrap();
        session.toggle_aspect(0);
        assert_eq!(session.crop(), Some(crop));
    }

    #[test]
    fn test_burst_renders_once_with_final_values() {
        let mut session = loaded(100, 100);
        session.image_displayed(100.0, 100.0);

        let t0 = session
            .complete_crop(PixelCrop::new(0.0, 0.0, 100.0, 100.0), 0)
            .unwrap();
        let t1 = session.set_scale(1.5, 30).unwrap();
        let t2 = session.set_scale(2.0, 60).unwrap();
        let t3 = session.set_rotation(90.0, 90).unwrap();

        // Superseded timers fire without effect
        assert!(!session.fire_render(t0).unwrap());
        assert!(!session.fire_render(t1).unwrap());
        assert!(!session.fire_render(t2).unwrap());
        assert!(session.preview().is_none());

        assert!(!session.poll_render(150).unwrap());
        assert!(session.fire_render(t3).unwrap());
        assert!(!session.poll_render(10_000).unwrap());

        let preview = session.preview().unwrap();
        assert_eq!((preview.width(), preview.height()), (100, 100));

        let expected = crate::render::render_preview(
            session.source().unwrap(),
            &RenderParams {
                display_size: Some((100.0, 100.0)),
                ..RenderParams::new(
                    PixelCrop::new(0.0, 0.0, 100.0, 100.0),
                    TransformState {
                        scale: 2.0,
                        rotation: 90,
                    },
                )
            },
        )
        .unwrap();
        assert_eq!(preview, &expected);
    }

    #[test]
    fn test_unchanged_values_do_not_reschedule() {
        let mut session = loaded(50, 50);
        session.complete_crop(PixelCrop::new(0.0, 0.0, 50.0, 50.0), 0);
        assert!(session.set_scale(1.0, 10).is_none());
        assert!(session.set_rotation(0.0, 10).is_none());
        assert_eq!(session.pending_render().unwrap().deadline_ms(), 100);
    }

    #[test]
    fn test_slider_values_are_clamped() {
        let mut session = loaded(10, 10);
        session.set_scale(0.01, 0);
        assert_eq!(session.transform().scale, 0.1);
        session.set_scale(10.5, 0);
        assert_eq!(session.transform().scale, 10.0);
        session.set_rotation(-181.0, 0);
        assert_eq!(session.transform().rotation, -180);
        session.set_rotation(12.4, 0);
        assert_eq!(session.transform().rotation, 12);
    }

    #[test]
    fn test_resets_are_independent() {
        let mut session = loaded(10, 10);
        session.set_scale(3.0, 0);
        session.set_rotation(45.0, 0);

        session.reset_rotation(0);
        assert_eq!(session.transform().rotation, 0);
        assert_eq!(session.transform().scale, 3.0);

        session.reset_scale(0);
        assert!(session.transform().is_identity());
    }

    #[test]
    fn test_complete_crop_is_clamped_to_display() {
        let mut session = loaded(200, 100);
        session.image_displayed(100.0, 50.0);
        session.complete_crop(PixelCrop::new(80.0, -5.0, 50.0, 70.0), 0);

        assert_eq!(
            session.completed_crop(),
            Some(PixelCrop::new(80.0, 0.0, 20.0, 50.0))
        );
        assert_eq!(session.preview_css_size(), Some((20.0, 50.0)));
    }

    #[test]
    fn test_zero_area_crop_skips_render() {
        let mut session = loaded(10, 10);
        let ticket = session
            .complete_crop(PixelCrop::new(2.0, 2.0, 0.0, 5.0), 0)
            .unwrap();
        assert!(!session.fire_render(ticket).unwrap());
        assert!(session.preview().is_none());
        assert!(!session.can_download());
        assert!(session.preview_css_size().is_none());
    }

    #[test]
    fn test_device_pixel_ratio_sizes_surface() {
        let mut session = loaded(100, 100);
        session.set_device_pixel_ratio(2.0);
        session.complete_crop(PixelCrop::new(0.0, 0.0, 100.0, 100.0), 0);
        session.set_scale(2.0, 0);
        session.set_rotation(90.0, 0);

        assert!(session.poll_render(100).unwrap());
        let preview = session.preview().unwrap();
        assert_eq!((preview.width(), preview.height()), (200, 200));

        session.set_device_pixel_ratio(f64::NAN);
        assert_eq!(session.device_pixel_ratio(), 1.0);
    }

    #[test]
    fn test_oversized_surface_is_an_error() {
        let mut session = loaded(10, 10);
        session.set_device_pixel_ratio(1e6);
        session.complete_crop(PixelCrop::new(0.0, 0.0, 10.0, 10.0), 0);
        assert!(matches!(
            session.poll_render(100),
            Err(CropperError::SurfaceTooLarge { .. })
        ));
        assert!(session.preview().is_none());
    }

    #[test]
    fn test_failed_render_drops_older_preview() {
        let mut session = loaded(10, 10);
        session.complete_crop(PixelCrop::new(0.0, 0.0, 4.0, 4.0), 0);
        assert!(session.poll_render(100).unwrap());
        assert_eq!(session.preview().map(Surface::width), Some(4));

        session.set_device_pixel_ratio(1e6);
        session.complete_crop(PixelCrop::new(0.0, 0.0, 10.0, 10.0), 200);
        assert!(matches!(
            session.poll_render(300),
            Err(CropperError::SurfaceTooLarge { .. })
        ));

        assert!(session.preview().is_none());
        let mut slot = DownloadSlot::new(RecordingTarget::default());
        assert!(matches!(
            session.export(&mut slot),
            Err(CropperError::PreviewMissing)
        ));
        assert!(slot.target().clicks.is_empty());
    }

    #[test]
    fn test_lock_needs_displayed_image() {
        let mut session = loaded(10, 10);
        assert!(session.toggle_aspect(0).is_none());
        assert_eq!(session.aspect(), None);

        // Still unlocked: no image has been laid out yet
        assert!(session.toggle_aspect(0).is_none());
        assert_eq!(session.aspect(), None);

        session.image_displayed(160.0, 90.0);
        assert!(session.toggle_aspect(0).is_some());
        assert_eq!(session.aspect(), Some(16.0 / 9.0));
    }

    #[test]
    fn test_new_image_resets_crop_and_cancels_render() {
        let mut session = loaded(100, 100);
        session.image_displayed(100.0, 100.0);
        session.complete_crop(PixelCrop::new(0.0, 0.0, 50.0, 50.0), 0);
        assert!(session.poll_render(100).unwrap());
        let ticket = session.set_scale(2.0, 200).unwrap();

        session.load_image(gradient(20, 20));

        assert_eq!(session.phase(), SessionPhase::Loaded);
        assert!(session.crop().is_none());
        assert!(session.completed_crop().is_none());
        assert!(session.preview().is_none());
        assert!(session.display_size().is_none());
        assert!(!session.fire_render(ticket).unwrap());
        // Scale carries over
        assert_eq!(session.transform().scale, 2.0);
    }

    #[test]
    fn test_same_crop_after_reload_still_renders() {
        let mut session = loaded(10, 10);
        let crop = PixelCrop::new(0.0, 0.0, 10.0, 10.0);
        session.complete_crop(crop, 0);
        assert!(session.poll_render(100).unwrap());

        session.load_image(gradient(10, 10));
        assert!(session.complete_crop(crop, 200).is_some());
    }

    #[test]
    fn test_export_requires_preview() {
        let session = loaded(10, 10);
        let mut slot = DownloadSlot::new(RecordingTarget::default());
        assert!(matches!(
            session.export(&mut slot),
            Err(CropperError::PreviewMissing)
        ));
        assert!(slot.target().live.is_empty());
    }

    #[test]
    fn test_double_download_keeps_one_url() {
        let mut session = loaded(40, 30);
        session.image_displayed(40.0, 30.0);
        session.complete_crop(PixelCrop::new(5.0, 5.0, 20.0, 10.0), 0);
        assert!(session.poll_render(100).unwrap());
        assert!(session.can_download());

        let mut slot = DownloadSlot::new(RecordingTarget::default());
        let first = session.export(&mut slot).unwrap();
        let second = session.export(&mut slot).unwrap();

        assert_ne!(first, second);
        assert_eq!(slot.target().live, vec![second.clone()]);
        assert_eq!(slot.target().revoked, vec![first]);
        assert_eq!(slot.target().clicks.len(), 2);
        assert_eq!(slot.target().clicks[1], (second, "cropped.png".to_string()));
    }

    #[test]
    fn test_load_data_url() {
        use base64::Engine;
        use std::io::Cursor;

        let img = image::RgbaImage::from_pixel(6, 4, image::Rgba([9, 8, 7, 255]));
        let mut png = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut png, image::ImageFormat::Png)
            .unwrap();
        let url = format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(png.into_inner())
        );

        let mut session = CropSession::default();
        session.load_data_url(&url).unwrap();
        let source = session.source().unwrap();
        assert_eq!((source.width, source.height), (6, 4));
        assert_eq!(session.phase(), SessionPhase::Loaded);
    }

    #[test]
    fn test_failed_load_keeps_previous_image() {
        let mut session = loaded(10, 10);
        assert!(matches!(
            session.load_bytes(b"not an image"),
            Err(CropperError::Decode(_))
        ));
        assert_eq!(session.source().unwrap().width, 10);
    }
}
