//! # planogram-core: Pure Domain Logic for the Planogram Catalog
//!
//! This crate holds the record types, input validation, and the page
//! navigation state machine as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Planogram Catalog Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Browser (server-rendered HTML)                  │   │
//! │  │        Create page ──► List page ──► Detail page               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/server (axum)                           │   │
//! │  │    create, list, select, update, delete handlers                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ planogram-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐  ┌──────────┐  │   │
//! │  │   │   types   │  │ navigation │  │validation │  │   link   │  │   │
//! │  │   │ Planogram │  │  NavState  │  │  fields   │  │RecordLink│  │   │
//! │  │   │  Summary  │  │    Page    │  │  uploads  │  │          │  │   │
//! │  │   └───────────┘  └────────────┘  └───────────┘  └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  planogram-db (Database Layer)                  │   │
//! │  │              SQLite queries, migrations, repository             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Record types (PlanogramRecord, PlanogramSummary, inputs)
//! - [`navigation`] - Create/List/Detail page state machine
//! - [`validation`] - Form field and upload validation
//! - [`link`] - Record URL encoded into QR codes
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use planogram_core::navigation::{NavAction, NavState, Page};
//!
//! let state = NavState::new();
//! assert_eq!(state.current_page(), Page::Create);
//!
//! let state = state.apply(NavAction::Select(7));
//! assert_eq!(state.current_page(), Page::Detail);
//! assert_eq!(state.selected(), Some(7));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod link;
pub mod navigation;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use link::RecordLink;
pub use navigation::{NavAction, NavState, Page};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// File extensions accepted by the upload forms (compared case-insensitively).
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];
