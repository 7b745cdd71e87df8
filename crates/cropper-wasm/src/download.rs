//! Object-URL downloads.

use cropper_core::encode::ExportBlob;
use cropper_core::{CropperError, DownloadTarget};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Saves files through `URL.createObjectURL` and a detached `<a download>`.
#[derive(Debug, Default)]
pub(crate) struct BrowserDownload;

fn js_error(context: &str, err: JsValue) -> CropperError {
    let detail = err.as_string().unwrap_or_else(|| format!("{:?}", err));
    CropperError::Download(format!("{}: {}", context, detail))
}

impl DownloadTarget for BrowserDownload {
    fn create_url(&mut self, blob: &ExportBlob) -> Result<String, CropperError> {
        let bytes = js_sys::Uint8Array::from(blob.bytes.as_slice());
        let parts = js_sys::Array::of1(&bytes);
        let options = BlobPropertyBag::new();
        options.set_type(&blob.mime);

        let js_blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| js_error("Blob creation failed", e))?;
        Url::create_object_url_with_blob(&js_blob).map_err(|e| js_error("createObjectURL failed", e))
    }

    fn revoke_url(&mut self, url: &str) {
        if let Err(e) = Url::revoke_object_url(url) {
            log::warn!("revokeObjectURL failed: {:?}", e);
        }
    }

    fn trigger(&mut self, url: &str, filename: &str) -> Result<(), CropperError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| CropperError::Download("No document available".into()))?;
        let anchor = document
            .create_element("a")
            .map_err(|e| js_error("Anchor creation failed", e))?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|e| js_error("Anchor creation failed", e.into()))?;
        anchor.set_href(url);
        anchor.set_download(filename);
        anchor.click();
        Ok(())
    }
}
