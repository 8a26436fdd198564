//! # Domain Types
//!
//! Record types used throughout the planogram catalog.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ PlanogramRecord │   │PlanogramSummary │   │  NewPlanogram   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id             │   │  name, image    │       │
//! │  │  name           │   │  name           │   │  store, aisle   │       │
//! │  │  image (blob)   │   │  store/aisle/   │   │  shelf          │       │
//! │  │  store/aisle/   │   │  shelf          │   └─────────────────┘       │
//! │  │  shelf          │   │  (no image)     │   ┌─────────────────┐       │
//! │  └─────────────────┘   └─────────────────┘   │ PlanogramUpdate │       │
//! │                                              │  image: Option  │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `id` is assigned by the store on insert (SQLite AUTOINCREMENT) and is
//! never reused or changed afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validation::{validate_image_bytes, validate_text_field, ValidationResult};

/// Primary key of a planogram row.
pub type PlanogramId = i64;

// =============================================================================
// Planogram Record
// =============================================================================

/// A stored planogram: a named shelf image with its location metadata.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PlanogramRecord {
    /// Store-assigned identifier.
    pub id: PlanogramId,

    /// Display label.
    pub name: String,

    /// Raw bytes of the uploaded raster file, exactly as uploaded.
    pub image: Vec<u8>,

    /// Store the shelf belongs to.
    pub store: String,

    /// Aisle within the store.
    pub aisle: String,

    /// Shelf within the aisle.
    pub shelf: String,
}

impl PlanogramRecord {
    /// Returns the metadata view of this record.
    pub fn summary(&self) -> PlanogramSummary {
        PlanogramSummary {
            id: self.id,
            name: self.name.clone(),
            store: self.store.clone(),
            aisle: self.aisle.clone(),
            shelf: self.shelf.clone(),
        }
    }
}

// Image blobs can be megabytes; print their size instead.
impl fmt::Debug for PlanogramRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanogramRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("image_len", &self.image.len())
            .field("store", &self.store)
            .field("aisle", &self.aisle)
            .field("shelf", &self.shelf)
            .finish()
    }
}

// =============================================================================
// Planogram Summary
// =============================================================================

/// A planogram row without its image bytes (used by the list view).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PlanogramSummary {
    pub id: PlanogramId,
    pub name: String,
    pub store: String,
    pub aisle: String,
    pub shelf: String,
}

impl PlanogramSummary {
    /// Caption shown under a planogram image: "Store: … | Aisle: … | Shelf: …".
    pub fn caption(&self) -> String {
        format!(
            "Store: {} | Aisle: {} | Shelf: {}",
            self.store, self.aisle, self.shelf
        )
    }
}

// =============================================================================
// Create / Update Inputs
// =============================================================================

/// The five inputs required to create a planogram.
#[derive(Clone, PartialEq, Eq)]
pub struct NewPlanogram {
    pub name: String,
    pub image: Vec<u8>,
    pub store: String,
    pub aisle: String,
    pub shelf: String,
}

impl NewPlanogram {
    /// Checks that every field is present.
    ///
    /// Fields are checked in form order so the user sees the first
    /// missing one.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_text_field("name", &self.name)?;
        validate_image_bytes(&self.image)?;
        validate_text_field("store", &self.store)?;
        validate_text_field("aisle", &self.aisle)?;
        validate_text_field("shelf", &self.shelf)?;
        Ok(())
    }
}

impl fmt::Debug for NewPlanogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewPlanogram")
            .field("name", &self.name)
            .field("image_len", &self.image.len())
            .field("store", &self.store)
            .field("aisle", &self.aisle)
            .field("shelf", &self.shelf)
            .finish()
    }
}

/// Edit-form values for an existing planogram.
///
/// Text fields always overwrite the stored values. `image` replaces the
/// stored bytes only when `Some`.
#[derive(Clone, PartialEq, Eq)]
pub struct PlanogramUpdate {
    pub name: String,
    pub image: Option<Vec<u8>>,
    pub store: String,
    pub aisle: String,
    pub shelf: String,
}

impl PlanogramUpdate {
    /// Checks the text fields and, when present, the replacement image.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_text_field("name", &self.name)?;
        if let Some(image) = &self.image {
            validate_image_bytes(image)?;
        }
        validate_text_field("store", &self.store)?;
        validate_text_field("aisle", &self.aisle)?;
        validate_text_field("shelf", &self.shelf)?;
        Ok(())
    }

    /// True when the update carries a replacement image.
    pub fn replaces_image(&self) -> bool {
        self.image.is_some()
    }
}

impl fmt::Debug for PlanogramUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanogramUpdate")
            .field("name", &self.name)
            .field("image_len", &self.image.as_ref().map(Vec::len))
            .field("store", &self.store)
            .field("aisle", &self.aisle)
            .field("shelf", &self.shelf)
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn new_planogram() -> NewPlanogram {
        NewPlanogram {
            name: "Shelf A".to_string(),
            image: vec![0x89, b'P', b'N', b'G'],
            store: "Store1".to_string(),
            aisle: "Aisle3".to_string(),
            shelf: "Shelf2".to_string(),
        }
    }

    #[test]
    fn test_new_planogram_valid() {
        assert!(new_planogram().validate().is_ok());
    }

    #[test]
    fn test_new_planogram_reports_first_missing_field() {
        let mut input = new_planogram();
        input.store = String::new();
        input.shelf = String::new();
        assert_eq!(
            input.validate().unwrap_err(),
            ValidationError::required("store")
        );
    }

    #[test]
    fn test_new_planogram_requires_image() {
        let mut input = new_planogram();
        input.image.clear();
        assert_eq!(
            input.validate().unwrap_err(),
            ValidationError::required("image")
        );
    }

    #[test]
    fn test_update_without_image_is_valid() {
        let update = PlanogramUpdate {
            name: "Shelf A2".to_string(),
            image: None,
            store: "Store1".to_string(),
            aisle: "Aisle3".to_string(),
            shelf: "Shelf2".to_string(),
        };
        assert!(update.validate().is_ok());
        assert!(!update.replaces_image());
    }

    #[test]
    fn test_update_rejects_empty_replacement_image() {
        let update = PlanogramUpdate {
            name: "Shelf A2".to_string(),
            image: Some(Vec::new()),
            store: "Store1".to_string(),
            aisle: "Aisle3".to_string(),
            shelf: "Shelf2".to_string(),
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_summary_and_caption() {
        let record = PlanogramRecord {
            id: 1,
            name: "Shelf A".to_string(),
            image: vec![1, 2, 3],
            store: "Store1".to_string(),
            aisle: "Aisle3".to_string(),
            shelf: "Shelf2".to_string(),
        };
        let summary = record.summary();
        assert_eq!(summary.id, 1);
        assert_eq!(summary.caption(), "Store: Store1 | Aisle: Aisle3 | Shelf: Shelf2");
    }

    #[test]
    fn test_record_debug_hides_image_bytes() {
        let record = PlanogramRecord {
            id: 3,
            name: "n".to_string(),
            image: vec![0; 4096],
            store: "s".to_string(),
            aisle: "a".to_string(),
            shelf: "f".to_string(),
        };
        let debug = format!("{:?}", record);
        assert!(debug.contains("image_len: 4096"));
    }
}
