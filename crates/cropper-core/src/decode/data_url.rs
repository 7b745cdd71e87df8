//! Data URL parsing.
//!
//! The browser hands a selected file over as `data:<mime>;base64,<payload>`
//! (what `FileReader.readAsDataURL` produces). Only base64 payloads are
//! accepted; the reader never emits the percent-encoded form.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::{decode_image, DecodeError, DecodedImage};

/// A parsed `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    /// Media type, lowercased. Empty when the URL omits it.
    pub mime: String,
    /// Decoded payload bytes.
    pub bytes: Vec<u8>,
}

/// Parse a base64 `data:` URL into its media type and payload.
///
/// # Errors
///
/// Returns `DecodeError::MalformedDataUrl` if the scheme, separator or
/// base64 marker is missing, or the payload is not valid base64.
pub fn parse_data_url(url: &str) -> Result<DataUrl, DecodeError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| DecodeError::MalformedDataUrl("missing data: scheme".to_string()))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| DecodeError::MalformedDataUrl("missing ',' separator".to_string()))?;

    let mut params = header.split(';');
    let mime = params.next().unwrap_or_default().trim().to_ascii_lowercase();
    if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
        return Err(DecodeError::MalformedDataUrl(
            "only base64 payloads are supported".to_string(),
        ));
    }

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| DecodeError::MalformedDataUrl(e.to_string()))?;

    Ok(DataUrl { mime, bytes })
}

/// Check a media type against the picker's `image/*` accept filter.
pub fn is_supported_image_mime(mime: &str) -> bool {
    mime.trim().to_ascii_lowercase().starts_with("image/")
}

/// Decode a `data:` URL produced by the file reader into pixels.
///
/// An empty media type is tolerated (the reader emits one for files the
/// browser could not classify) and left to format sniffing.
///
/// # Errors
///
/// Returns `DecodeError::NotAnImage` for a non-image media type, otherwise
/// whatever [`parse_data_url`] or [`decode_image`] report.
pub fn decode_data_url(url: &str) -> Result<DecodedImage, DecodeError> {
    let data = parse_data_url(url)?;
    if !data.mime.is_empty() && !is_supported_image_mime(&data.mime) {
        return Err(DecodeError::NotAnImage(data.mime));
    }
    decode_image(&data.bytes)
}
