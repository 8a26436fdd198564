//! # planogram-db: Database Layer for the Planogram Catalog
//!
//! This crate provides database access for the planogram catalog.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Planogram Catalog Data Flow                       │
//! │                                                                         │
//! │  Server handler (create / list / update / delete)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   planogram-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌───────────────┐  │   │
//! │  │   │   Database    │    │   Repository   │   │  Migrations   │  │   │
//! │  │   │   (pool.rs)   │    │ (planogram.rs) │   │  (embedded)   │  │   │
//! │  │   │               │    │                │   │               │  │   │
//! │  │   │ SqlitePool    │◄───│ PlanogramRepo  │   │ 001_planogr.. │  │   │
//! │  │   └───────────────┘    └────────────────┘   └───────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <data dir>/planograma.db  (table: planogramas)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use planogram_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/planograma.db")).await?;
//! let id = db.planograms().create(&new_planogram).await?;
//! let rows = db.planograms().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use migrations::MigrationStatus;
pub use pool::{Database, DbConfig};

pub use repository::planogram::PlanogramRepository;
