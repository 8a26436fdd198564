//! # Validation Module
//!
//! Input validation for the create and edit forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Browser                                                      │
//! │  ├── `required` attributes, `accept=".jpg,.jpeg,.png"`                 │
//! │  └── Convenience only, never trusted                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Server handler                                               │
//! │  └── THIS MODULE: required fields, upload extension                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Repository                                                   │
//! │  └── Re-runs NewPlanogram/PlanogramUpdate::validate before writing     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 4: Image codec (on read)                                        │
//! │  └── The real gate against corrupt or mislabeled image bytes           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use planogram_core::validation::{validate_image_file_name, validate_text_field};
//!
//! assert!(validate_text_field("store", "Store1").is_ok());
//! assert!(validate_image_file_name("aisle3.PNG").is_ok());
//! assert!(validate_image_file_name("aisle3.gif").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::PlanogramId;
use crate::ALLOWED_IMAGE_EXTENSIONS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Text Fields
// =============================================================================

/// Validates one of the four text fields (name, store, aisle, shelf).
///
/// Only the empty string is rejected; whitespace-only and long values are
/// stored as entered.
pub fn validate_text_field(field: &str, value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

// =============================================================================
// Uploads
// =============================================================================

/// Validates that image bytes are present.
pub fn validate_image_bytes(bytes: &[u8]) -> ValidationResult<()> {
    if bytes.is_empty() {
        return Err(ValidationError::required("image"));
    }
    Ok(())
}

/// Validates an uploaded file name against the accepted extensions.
///
/// ## Returns
/// The lower-cased extension (`"jpg"`, `"jpeg"` or `"png"`).
///
/// ## Example
/// ```rust
/// use planogram_core::validation::validate_image_file_name;
///
/// assert_eq!(validate_image_file_name("shelf.JPeG").unwrap(), "jpeg");
/// assert!(validate_image_file_name("shelf").is_err());
/// ```
pub fn validate_image_file_name(file_name: &str) -> ValidationResult<String> {
    let file_name = file_name.trim();
    if file_name.is_empty() {
        return Err(ValidationError::required("image"));
    }

    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if ALLOWED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        Ok(extension)
    } else {
        Err(ValidationError::UnsupportedFileType {
            file_name: file_name.to_string(),
            allowed: ALLOWED_IMAGE_EXTENSIONS.join(", "),
        })
    }
}

// =============================================================================
// Identifiers
// =============================================================================

/// Parses a planogram id from a path segment or form value.
///
/// ## Rules
/// - Must be a positive integer (SQLite AUTOINCREMENT starts at 1)
pub fn parse_planogram_id(raw: &str) -> ValidationResult<PlanogramId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::required("id"));
    }

    match raw.parse::<PlanogramId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: "must be a positive integer".to_string(),
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
