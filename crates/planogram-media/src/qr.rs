//! # QR Encoder
//!
//! Renders a record link as a black-on-white PNG QR code.
//!
//! ## Rendering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  payload ──► qrcode (module matrix, EC level M)                         │
//! │                  │                                                      │
//! │                  ▼                                                      │
//! │  ┌──────────────────────────────┐                                       │
//! │  │ quiet zone (4 modules)       │  each module = module_px × module_px  │
//! │  │   ┌──────────────────────┐   │  dark  → luma 0                       │
//! │  │   │ ▓▓▓ ▓ ▓▓▓  modules   │   │  light → luma 255                     │
//! │  │   └──────────────────────┘   │                                       │
//! │  └──────────────────────────────┘                                       │
//! │                  │                                                      │
//! │                  ▼                                                      │
//! │  8-bit grayscale PNG (same input → same bytes)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use qrcode::{Color, EcLevel, QrCode};
use tracing::debug;

use crate::error::{MediaError, MediaResult};

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// QR code renderer.
///
/// ## Example
/// ```rust
/// use planogram_media::QrEncoder;
///
/// let png = QrEncoder::default().encode("localhost:8501/1").unwrap();
/// assert_eq!(&png[1..4], b"PNG");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct QrEncoder {
    /// Pixel size of one module.
    module_px: u32,
    /// Blank border, in modules.
    quiet_zone: u32,
    ec_level: EcLevel,
}

impl Default for QrEncoder {
    fn default() -> Self {
        QrEncoder {
            module_px: 8,
            quiet_zone: 4,
            ec_level: EcLevel::M,
        }
    }
}

impl QrEncoder {
    /// Sets the pixel size of one module (minimum 1).
    pub fn module_px(mut self, px: u32) -> Self {
        self.module_px = px.max(1);
        self
    }

    /// Sets the quiet zone width in modules.
    pub fn quiet_zone(mut self, modules: u32) -> Self {
        self.quiet_zone = modules;
        self
    }

    /// Encodes `payload` and returns PNG bytes.
    ///
    /// Fails only when the payload exceeds QR capacity.
    pub fn encode(&self, payload: &str) -> MediaResult<Vec<u8>> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), self.ec_level)?;
        let modules = code.width() as u32;
        let colors = code.to_colors();

        let side = (modules + 2 * self.quiet_zone) * self.module_px;
        let module_px = self.module_px;
        let quiet_zone = self.quiet_zone;

        let img = GrayImage::from_fn(side, side, |x, y| {
            let mx = x / module_px;
            let my = y / module_px;
            if mx < quiet_zone
                || my < quiet_zone
                || mx >= quiet_zone + modules
                || my >= quiet_zone + modules
            {
                return LIGHT;
            }
            let index = ((my - quiet_zone) * modules + (mx - quiet_zone)) as usize;
            match colors[index] {
                Color::Dark => DARK,
                Color::Light => LIGHT,
            }
        });

        let mut png = Vec::new();
        DynamicImage::ImageLuma8(img)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| MediaError::Encode(e.to_string()))?;

        debug!(
            payload_len = payload.len(),
            modules,
            side,
            png_bytes = png.len(),
            "Rendered QR code"
        );

        Ok(png)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_is_deterministic() {
        let encoder = QrEncoder::default();
        let first = encoder.encode("localhost:8501/1").unwrap();
        let second = encoder.encode("localhost:8501/1").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_payloads_differ() {
        let encoder = QrEncoder::default();
        assert_ne!(
            encoder.encode("localhost:8501/1").unwrap(),
            encoder.encode("localhost:8501/2").unwrap()
        );
    }

    #[test]
    fn test_output_is_square_png_with_quiet_zone() {
        let png = QrEncoder::default()
            .module_px(2)
            .quiet_zone(4)
            .encode("shelf")
            .unwrap();
        let img = image::load_from_memory_with_format(&png, ImageFormat::Png)
            .unwrap()
            .to_luma8();

        // Version 1 symbol: 21 modules + 2 * 4 quiet modules, 2 px each.
        assert_eq!(img.width(), (21 + 8) * 2);
        assert_eq!(img.width(), img.height());
        assert_eq!(*img.get_pixel(0, 0), LIGHT);
        // Top-left finder pattern starts right after the quiet zone.
        assert_eq!(*img.get_pixel(8, 8), DARK);
    }

    #[test]
    fn test_module_px_has_floor() {
        let png = QrEncoder::default().module_px(0).quiet_zone(0).encode("a").unwrap();
        let img = image::load_from_memory(&png).unwrap();
        assert_eq!(img.width(), 21);
    }

    #[test]
    fn test_oversized_payload_fails() {
        let payload = "x".repeat(8000);
        assert!(matches!(
            QrEncoder::default().encode(&payload),
            Err(MediaError::Encode(_))
        ));
    }
}
