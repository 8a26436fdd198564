//! # Planogram Server Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Browser ──► axum Router ──► handlers ──► planogram-db ──► SQLite      │
//! │                                  │                                      │
//! │                                  └──► planogram-media (decode, QR)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No command-line flags; see `config.rs` for the file and environment
//! settings.

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The actual setup is in lib.rs for testability
    planogram_server::run().await
}
