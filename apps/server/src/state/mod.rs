//! # State Module
//!
//! Shared state handed to every axum handler.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  Router::with_state(AppState)                                          │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │   Database   │  │ SessionStore │  │ QrEncoder +      │              │
//! │  │  (SQLite     │  │  Arc<Mutex<  │  │ RecordLink       │              │
//! │  │   pool)      │  │  HashMap>>   │  │ (read-only)      │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Database: internal connection pool                                  │
//! │  • SessionStore: short critical sections behind a Mutex                │
//! │  • QrEncoder / RecordLink: immutable after startup                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod session;

pub use session::{session_cookie, session_id_from, Flash, FlashKind, SessionState, SessionStore, SESSION_COOKIE};

use planogram_core::RecordLink;
use planogram_db::Database;
use planogram_media::QrEncoder;

/// State cloned into each request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub sessions: SessionStore,
    pub qr: QrEncoder,
    pub link: RecordLink,
}

impl AppState {
    pub fn new(db: Database, sessions: SessionStore, link: RecordLink) -> Self {
        AppState {
            db,
            sessions,
            qr: QrEncoder::default(),
            link,
        }
    }
}
