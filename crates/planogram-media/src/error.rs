//! # Media Error Types

use thiserror::Error;

/// Errors from decoding stored images or rendering QR codes.
#[derive(Debug, Error)]
pub enum MediaError {
    /// Stored bytes are not a decodable PNG/JPEG image.
    ///
    /// ## When This Occurs
    /// - Truncated or corrupt upload
    /// - A file renamed to `.png` that holds another format
    #[error("Image could not be decoded: {0}")]
    Decode(String),

    /// QR payload could not be encoded (exceeds QR capacity).
    #[error("QR code could not be encoded: {0}")]
    Encode(String),
}

impl From<image::ImageError> for MediaError {
    fn from(err: image::ImageError) -> Self {
        MediaError::Decode(err.to_string())
    }
}

impl From<qrcode::types::QrError> for MediaError {
    fn from(err: qrcode::types::QrError) -> Self {
        MediaError::Encode(err.to_string())
    }
}

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;
