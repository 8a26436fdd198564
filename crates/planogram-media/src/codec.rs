//! # Image Codec
//!
//! Decodes stored planogram bytes into a raster image.
//!
//! ## Why Decode on Read?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Upload form checks only the file EXTENSION (.jpg/.jpeg/.png).          │
//! │  A renamed .gif or a truncated upload is stored as-is.                  │
//! │                                                                         │
//! │  decode() sniffs the real format from the magic bytes and runs the      │
//! │  full decoder. It is the authoritative gate: a record whose bytes       │
//! │  fail here renders as "image unavailable" while every other record      │
//! │  still renders.                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The stored bytes are never re-encoded: callers serve the original upload
//! and use `DecodedImage` for its format and dimensions.

use image::{DynamicImage, ImageFormat};
use tracing::debug;

use crate::error::{MediaError, MediaResult};

/// A successfully decoded planogram image.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    format: ImageFormat,
    raster: DynamicImage,
}

impl DecodedImage {
    /// Detected container format (PNG or JPEG).
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    /// MIME type of the original bytes.
    pub fn mime_type(&self) -> &'static str {
        match self.format {
            ImageFormat::Jpeg => "image/jpeg",
            _ => "image/png",
        }
    }

    /// The decoded pixels.
    pub fn raster(&self) -> &DynamicImage {
        &self.raster
    }
}

/// Decodes stored image bytes.
///
/// ## Accepted Formats
/// PNG and JPEG, detected from the bytes themselves. Anything else fails
/// with `MediaError::Decode`, even when the upload carried a `.png` name.
///
/// ## Example
/// ```rust,ignore
/// let decoded = planogram_media::decode(&record.image)?;
/// println!("{}x{} {}", decoded.width(), decoded.height(), decoded.mime_type());
/// ```
pub fn decode(bytes: &[u8]) -> MediaResult<DecodedImage> {
    if bytes.is_empty() {
        return Err(MediaError::Decode("no image data".to_string()));
    }

    let format = image::guess_format(bytes)?;
    if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg) {
        return Err(MediaError::Decode(format!(
            "unsupported image format {:?}",
            format
        )));
    }

    let raster = image::load_from_memory_with_format(bytes, format)?;

    debug!(
        format = ?format,
        width = raster.width(),
        height = raster.height(),
        bytes = bytes.len(),
        "Decoded planogram image"
    );

    Ok(DecodedImage { format, raster })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::io::Cursor;

    fn encoded(format: ImageFormat, width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 40, 40]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), format)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_png() {
        let decoded = decode(&encoded(ImageFormat::Png, 6, 4)).unwrap();
        assert_eq!(decoded.format(), ImageFormat::Png);
        assert_eq!((decoded.width(), decoded.height()), (6, 4));
        assert_eq!(decoded.mime_type(), "image/png");
    }

    #[test]
    fn test_decode_jpeg() {
        let decoded = decode(&encoded(ImageFormat::Jpeg, 16, 8)).unwrap();
        assert_eq!(decoded.format(), ImageFormat::Jpeg);
        assert_eq!(decoded.mime_type(), "image/jpeg");
        assert_eq!(decoded.raster().width(), 16);
    }

    #[test]
    fn test_decode_empty_fails() {
        assert!(matches!(decode(&[]), Err(MediaError::Decode(_))));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode(b"definitely not an image").is_err());
    }

    #[test]
    fn test_decode_truncated_png_fails() {
        let mut bytes = encoded(ImageFormat::Png, 6, 4);
        bytes.truncate(20);
        assert!(matches!(decode(&bytes), Err(MediaError::Decode(_))));
    }

    #[test]
    fn test_decode_rejects_other_formats() {
        assert!(decode(b"GIF89a\x01\x00\x01\x00\x00\x00\x00;").is_err());
    }
}
