//! # Repository Module
//!
//! Database repository implementations for the planogram catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Request handler                                                       │
//! │       │                                                                 │
//! │       │  state.db.planograms().list()                                  │
//! │       ▼                                                                 │
//! │  PlanogramRepository                                                   │
//! │  ├── create(&self, new)                                                │
//! │  ├── get(&self, id)                                                    │
//! │  ├── list(&self)                                                       │
//! │  ├── update(&self, id, changes)                                        │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       │  One committed statement per call                              │
//! │       ▼                                                                 │
//! │  SQLite table `planogramas`                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`planogram::PlanogramRepository`] - Planogram CRUD and image blobs

pub mod planogram;
