//! # planogram-media: Image Codec and QR Encoder
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  stored image bytes ──► codec::decode ──► DecodedImage                 │
//! │                          (PNG / JPEG)      format, width, height        │
//! │                               │                                         │
//! │                               └──✗ MediaError::Decode (corrupt bytes)   │
//! │                                                                         │
//! │  "host:port/42" ──────► QrEncoder::encode ──► PNG bytes                │
//! │                          (deterministic)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`codec`] - Decoding stored uploads (never re-encodes them)
//! - [`qr`] - QR code rendering
//! - [`error`] - Media error types

pub mod codec;
pub mod error;
pub mod qr;

pub use codec::{decode, DecodedImage};
pub use error::{MediaError, MediaResult};
pub use qr::QrEncoder;
