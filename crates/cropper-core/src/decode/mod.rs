//! Image decoding for the cropper.
//!
//! This module provides functionality for:
//! - Parsing the `data:` URLs a browser file reader produces
//! - Decoding the payload (PNG, JPEG, GIF, WebP, BMP) to RGBA pixels
//! - Correcting EXIF orientation so the source matches what the browser shows
//!
//! # Examples
//!
//! ```ignore
//! use cropper_core::decode::decode_data_url;
//!
//! let image = decode_data_url(&reader_result).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod data_url;
mod reader;
mod types;

pub use data_url::{decode_data_url, is_supported_image_mime, parse_data_url, DataUrl};
pub use reader::decode_image;
pub use types::{DecodeError, DecodedImage, Orientation};
