//! The interactive cropper bound to a preview `<canvas>`.
//!
//! [`ImageCropper`] owns a [`CropSession`] and performs the browser side
//! effects the session asks for: reading the selected file, arming the
//! debounce timer, painting the preview and starting downloads. The page
//! forwards one call per control event.
//!
//! # Example
//!
//! ```typescript
//! import { ImageCropper } from '@cropper/wasm';
//!
//! const cropper = new ImageCropper(previewCanvas, { debounceMs: 100 });
//!
//! fileInput.onchange = () =>
//!   cropper.select_file(fileInput.files[0], (err, dataUrl) => {
//!     if (!err) img.src = dataUrl;
//!   });
//! img.onload = () => overlay.setCrop(cropper.image_displayed(img.width, img.height));
//! overlay.onChange = (_, percent) => cropper.change_crop(percent);
//! overlay.onComplete = (pixels) => cropper.complete_crop(pixels);
//! scaleSlider.oninput = (e) => cropper.set_scale(e.target.valueAsNumber);
//! downloadButton.onclick = () => cropper.download();
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use cropper_core::decode::is_supported_image_mime;
use cropper_core::geometry::{Crop, PixelCrop};
use cropper_core::{CropSession, CropperError, DebounceTicket, DownloadSlot, SessionPhase};
use gloo_file::callbacks::{read_as_data_url, FileReader};
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

use crate::download::BrowserDownload;
use crate::types::config_from_js;

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn now_ms() -> u64 {
    js_sys::Date::now().max(0.0) as u64
}

fn device_pixel_ratio() -> f64 {
    web_sys::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
}

struct Inner {
    session: RefCell<CropSession>,
    canvas: HtmlCanvasElement,
    timer: RefCell<Option<Timeout>>,
    reader: RefCell<Option<FileReader>>,
    downloads: RefCell<DownloadSlot<BrowserDownload>>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.downloads.get_mut().release();
    }
}

impl Inner {
    /// Arm the host timer for `ticket`, replacing (and so clearing) the
    /// previous one.
    fn arm(self: &Rc<Self>, ticket: Option<DebounceTicket>) {
        let Some(ticket) = ticket else {
            return;
        };
        let delay = u32::try_from(ticket.delay_ms()).unwrap_or(u32::MAX);
        let weak: Weak<Inner> = Rc::downgrade(self);
        *self.timer.borrow_mut() = Some(Timeout::new(delay, move || {
            if let Some(inner) = weak.upgrade() {
                inner.timer.borrow_mut().take();
                inner.run(ticket);
            }
        }));
    }

    fn run(&self, ticket: DebounceTicket) {
        match self.render(ticket) {
            Ok(true) => {
                if let Err(e) = self.paint() {
                    log::error!("Painting the preview failed: {:?}", e);
                }
            }
            Ok(false) => {}
            Err(e) => log::error!("Preview render failed: {}", e),
        }
    }

    /// Render for `ticket` at the current device pixel ratio. The canvas is
    /// blanked when rendering fails.
    fn render(&self, ticket: DebounceTicket) -> Result<bool, CropperError> {
        let result = {
            let mut session = self.session.borrow_mut();
            session.set_device_pixel_ratio(device_pixel_ratio());
            session.fire_render(ticket)
        };
        if result.is_err() {
            self.clear_canvas();
        }
        result
    }

    /// Copy the preview surface onto the canvas.
    fn paint(&self) -> Result<(), JsValue> {
        let session = self.session.borrow();
        let Some(surface) = session.preview() else {
            return Ok(());
        };
        if surface.is_empty() {
            return Ok(());
        }

        self.canvas.set_width(surface.width());
        self.canvas.set_height(surface.height());
        if let Some((w, h)) = session.preview_css_size() {
            let style = self.canvas.style();
            style.set_property("width", &format!("{}px", w))?;
            style.set_property("height", &format!("{}px", h))?;
        }

        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let data = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(surface.pixels()),
            surface.width(),
            surface.height(),
        )?;
        ctx.put_image_data(&data, 0.0, 0.0)
    }

    /// Blank the canvas after the preview was invalidated.
    fn clear_canvas(&self) {
        self.canvas.set_width(0);
        self.canvas.set_height(0);
    }
}

/// Browser image cropper.
///
/// Dropping (or `free()`-ing) the cropper cancels the pending redraw and any
/// file read in progress, and revokes the last download URL.
#[wasm_bindgen]
pub struct ImageCropper {
    inner: Rc<Inner>,
}

#[wasm_bindgen]
impl ImageCropper {
    /// Create a cropper that paints its preview onto `canvas`.
    ///
    /// `options` is an optional object with any of the `CropperConfig`
    /// fields in camelCase (`debounceMs`, `defaultAspect`, `downloadName`, ...).
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, options: JsValue) -> Result<ImageCropper, JsValue> {
        let config = config_from_js(options)?;
        Ok(ImageCropper {
            inner: Rc::new(Inner {
                session: RefCell::new(CropSession::new(config)),
                canvas,
                timer: RefCell::new(None),
                reader: RefCell::new(None),
                downloads: RefCell::new(DownloadSlot::new(BrowserDownload)),
            }),
        })
    }

    /// Read the selected file and make it the source image.
    ///
    /// `callback(error, dataUrl)` runs once the file is decoded; the page
    /// shows `dataUrl` in its `<img>` and then reports the laid-out size
    /// through [`ImageCropper::image_displayed`]. Selecting again before the
    /// read finishes abandons the earlier read.
    pub fn select_file(&self, file: web_sys::File, callback: js_sys::Function) -> Result<(), JsValue> {
        let mime = file.type_();
        if !mime.is_empty() && !is_supported_image_mime(&mime) {
            return Err(JsValue::from_str(&format!("Not an image file: {}", mime)));
        }
        log::debug!("Reading {} ({} bytes)", file.name(), file.size());

        let weak = Rc::downgrade(&self.inner);
        let file = gloo_file::File::from(file);
        let reader = read_as_data_url(&file, move |result| {
            let Some(inner) = weak.upgrade() else {
                return;
            };

            let outcome = result.map_err(to_js_error).and_then(|url| {
                inner
                    .session
                    .borrow_mut()
                    .load_data_url(&url)
                    .map(|()| url)
                    .map_err(to_js_error)
            });

            let call = match outcome {
                Ok(url) => {
                    inner.timer.borrow_mut().take();
                    inner.clear_canvas();
                    callback.call2(&JsValue::NULL, &JsValue::NULL, &JsValue::from_str(&url))
                }
                Err(err) => {
                    log::warn!("Loading the selected file failed: {:?}", err);
                    callback.call2(&JsValue::NULL, &err, &JsValue::UNDEFINED)
                }
            };
            if let Err(e) = call {
                log::error!("File callback threw: {:?}", e);
            }
        });
        *self.inner.reader.borrow_mut() = Some(reader);
        Ok(())
    }

    /// Report the size the `<img>` was laid out at.
    ///
    /// Returns the initial centered crop when an aspect lock is active,
    /// otherwise `undefined`.
    pub fn image_displayed(&self, width: f64, height: f64) -> Result<JsValue, JsValue> {
        let crop = self.inner.session.borrow_mut().image_displayed(width, height);
        serde_wasm_bindgen::to_value(&crop).map_err(to_js_error)
    }

    /// Live crop update from the overlay (`{ unit, x, y, width, height }`).
    pub fn change_crop(&self, crop: JsValue) -> Result<(), JsValue> {
        let crop: Crop = serde_wasm_bindgen::from_value(crop).map_err(to_js_error)?;
        self.inner.session.borrow_mut().change_crop(crop);
        Ok(())
    }

    /// Committed crop from the overlay, in displayed pixels.
    pub fn complete_crop(&self, crop: JsValue) -> Result<(), JsValue> {
        let crop: PixelCrop = serde_wasm_bindgen::from_value(crop).map_err(to_js_error)?;
        let ticket = self.inner.session.borrow_mut().complete_crop(crop, now_ms());
        self.inner.arm(ticket);
        Ok(())
    }

    pub fn set_scale(&self, value: f64) {
        let ticket = self.inner.session.borrow_mut().set_scale(value, now_ms());
        self.inner.arm(ticket);
    }

    pub fn set_rotation(&self, degrees: f64) {
        let ticket = self.inner.session.borrow_mut().set_rotation(degrees, now_ms());
        self.inner.arm(ticket);
    }

    pub fn reset_scale(&self) {
        let ticket = self.inner.session.borrow_mut().reset_scale(now_ms());
        self.inner.arm(ticket);
    }

    pub fn reset_rotation(&self) {
        let ticket = self.inner.session.borrow_mut().reset_rotation(now_ms());
        self.inner.arm(ticket);
    }

    /// Flip the 16:9 lock. Returns the crop the overlay should show.
    pub fn toggle_aspect(&self) -> Result<JsValue, JsValue> {
        let (ticket, crop) = {
            let mut session = self.inner.session.borrow_mut();
            let ticket = session.toggle_aspect(now_ms());
            (ticket, session.crop())
        };
        self.inner.arm(ticket);
        serde_wasm_bindgen::to_value(&crop).map_err(to_js_error)
    }

    /// Render the pending preview now instead of waiting for the timer.
    ///
    /// Returns whether anything was drawn.
    pub fn flush(&self) -> Result<bool, JsValue> {
        let pending = self.inner.session.borrow().pending_render();
        let Some(ticket) = pending else {
            return Ok(false);
        };
        self.inner.timer.borrow_mut().take();
        let drawn = self.inner.render(ticket).map_err(to_js_error)?;
        if drawn {
            self.inner.paint()?;
        }
        Ok(drawn)
    }

    /// Export the preview and download it. Returns the object URL used.
    pub fn download(&self) -> Result<String, JsValue> {
        let session = self.inner.session.borrow();
        let mut downloads = self.inner.downloads.borrow_mut();
        session.export(&mut *downloads).map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.inner.session.borrow().transform().scale
    }

    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> i32 {
        self.inner.session.borrow().transform().rotation
    }

    #[wasm_bindgen(getter)]
    pub fn aspect(&self) -> Option<f64> {
        self.inner.session.borrow().aspect()
    }

    /// Whether the sliders and aspect toggle should be enabled.
    #[wasm_bindgen(getter)]
    pub fn controls_enabled(&self) -> bool {
        self.inner.session.borrow().controls_enabled()
    }

    /// Whether the download button should be shown.
    #[wasm_bindgen(getter)]
    pub fn can_download(&self) -> bool {
        self.inner.session.borrow().can_download()
    }

    /// `"empty"`, `"loaded"` or `"cropping"`.
    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        phase_name(self.inner.session.borrow().phase()).to_string()
    }

    /// The live crop, or `undefined`.
    pub fn crop(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.session.borrow().crop()).map_err(to_js_error)
    }

    pub fn completed_crop(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.session.borrow().completed_crop())
            .map_err(to_js_error)
    }

    /// Load an image from a data URL directly, skipping the file reader.
    pub fn load_data_url(&self, url: &str) -> Result<(), JsValue> {
        self.inner
            .session
            .borrow_mut()
            .load_data_url(url)
            .map_err(to_js_error)?;
        self.inner.timer.borrow_mut().take();
        self.inner.clear_canvas();
        Ok(())
    }
}

fn phase_name(phase: SessionPhase) -> &'static str {
    match phase {
        SessionPhase::Empty => "empty",
        SessionPhase::Loaded => "loaded",
        SessionPhase::Cropping => "cropping",
    }
}
