//! Temporary download URLs.
//!
//! Exporting hands the encoded blob to the host as a temporary URL (an object
//! URL in the browser) and clicks a hidden anchor pointing at it. A
//! [`DownloadSlot`] owns at most one such URL: publishing a new download
//! revokes the previous URL first.

use crate::encode::ExportBlob;
use crate::CropperError;

/// Host side of a download: URL lifetime plus the click that saves the file.
pub trait DownloadTarget {
    /// Create a temporary URL for `blob`.
    fn create_url(&mut self, blob: &ExportBlob) -> Result<String, CropperError>;

    /// Release a URL returned by [`DownloadTarget::create_url`].
    fn revoke_url(&mut self, url: &str);

    /// Start the download of `url` under `filename`.
    fn trigger(&mut self, url: &str, filename: &str) -> Result<(), CropperError>;
}

/// Holds the single live download URL.
#[derive(Debug)]
pub struct DownloadSlot<T> {
    target: T,
    current: Option<String>,
}

impl<T: DownloadTarget> DownloadSlot<T> {
    pub fn new(target: T) -> Self {
        Self {
            target,
            current: None,
        }
    }

    /// Revoke the previous URL, create one for `blob` and trigger the download.
    ///
    /// Returns the new URL, which stays live until the next publish or
    /// [`DownloadSlot::release`].
    pub fn publish(&mut self, blob: &ExportBlob, filename: &str) -> Result<String, CropperError> {
        if blob.is_empty() {
            return Err(CropperError::EmptyBlob);
        }

        if let Some(previous) = self.current.take() {
            log::debug!("Revoking download URL {}", previous);
            self.target.revoke_url(&previous);
        }

        let url = self.target.create_url(blob)?;
        self.current = Some(url.clone());
        self.target.trigger(&url, filename)?;
        log::debug!("Download of {} ({} bytes) started", filename, blob.len());
        Ok(url)
    }

    /// Revoke the live URL, if any.
    pub fn release(&mut self) {
        if let Some(url) = self.current.take() {
            self.target.revoke_url(&url);
        }
    }

    /// The URL currently held.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn target(&self) -> &T {
        &self.target
    }
}
