//! # Error Types
//!
//! Domain-specific error types for planogram-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  planogram-core errors (this file)                                     │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  planogram-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  planogram-media errors (separate crate)                               │
//! │  └── MediaError       - Image decode / QR encode failures              │
//! │                                                                         │
//! │  Server errors (in app)                                                │
//! │  └── ApiError         - What the browser sees                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unknown page name in a navigation request.
    #[error("Unknown page: '{0}'")]
    UnknownPage(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These surface as inline messages on the form; the user fixes the input
/// and submits again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Uploaded file does not carry an accepted image extension.
    #[error("{file_name} is not an accepted image (allowed: {allowed})")]
    UnsupportedFileType { file_name: String, allowed: String },

    /// Invalid format (e.g. a non-numeric id).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UnknownPage("cart".to_string());
        assert_eq!(err.to_string(), "Unknown page: 'cart'");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("store");
        assert_eq!(err.to_string(), "store is required");

        let err = ValidationError::UnsupportedFileType {
            file_name: "plan.gif".to_string(),
            allowed: "jpg, jpeg, png".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "plan.gif is not an accepted image (allowed: jpg, jpeg, png)"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("name").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
