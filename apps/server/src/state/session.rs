//! # Session State
//!
//! One entry per browser, keyed by the `planogram_session` cookie.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  request without cookie ──► new Uuid, NavState::new() (Create page)    │
//! │  request with cookie    ──► existing entry, last_seen = now            │
//! │  unknown/expired cookie ──► treated as a fresh session                 │
//! │                                                                         │
//! │  Every resolve() prunes entries idle for longer than the timeout.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The lock is held only for map operations, never across an `.await`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::http::{header, HeaderMap};
use chrono::{DateTime, Duration, Utc};
use tracing::debug;
use uuid::Uuid;

use planogram_core::{NavAction, NavState};

/// Cookie carrying the session id.
pub const SESSION_COOKIE: &str = "planogram_session";

/// One-shot message shown on the next render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Flash {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Flash {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}

/// Everything remembered about one browser.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub nav: NavState,
    pub flash: Option<Flash>,
    pub last_seen: DateTime<Utc>,
}

impl SessionState {
    fn new(now: DateTime<Utc>) -> Self {
        SessionState {
            nav: NavState::new(),
            flash: None,
            last_seen: now,
        }
    }
}

/// In-process session table shared by all handlers.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, SessionState>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        SessionStore {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            idle_timeout,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, SessionState>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the live session for the request cookie, creating one if needed.
    pub fn resolve(&self, headers: &HeaderMap) -> Uuid {
        self.resolve_at(session_id_from(headers), Utc::now())
    }

    fn resolve_at(&self, requested: Option<Uuid>, now: DateTime<Utc>) -> Uuid {
        let mut sessions = self.lock();

        let before = sessions.len();
        let idle = self.idle_timeout;
        sessions.retain(|_, s| now - s.last_seen <= idle);
        if sessions.len() < before {
            debug!(pruned = before - sessions.len(), "Dropped idle sessions");
        }

        if let Some(id) = requested {
            if let Some(session) = sessions.get_mut(&id) {
                session.last_seen = now;
                return id;
            }
        }

        let id = Uuid::new_v4();
        sessions.insert(id, SessionState::new(now));
        debug!(session = %id, "Started session");
        id
    }

    /// Current navigation state (fresh state for unknown ids).
    pub fn nav(&self, id: Uuid) -> NavState {
        self.lock().get(&id).map(|s| s.nav).unwrap_or_default()
    }

    /// Applies a navigation action and returns the new state.
    pub fn apply(&self, id: Uuid, action: NavAction) -> NavState {
        let mut sessions = self.lock();
        let session = sessions
            .entry(id)
            .or_insert_with(|| SessionState::new(Utc::now()));
        session.nav = session.nav.apply(action);
        session.nav
    }

    /// Applies an action to every session.
    ///
    /// Used after a delete so no other browser keeps the record selected.
    pub fn apply_all(&self, action: NavAction) {
        for session in self.lock().values_mut() {
            session.nav = session.nav.apply(action);
        }
    }

    pub fn set_flash(&self, id: Uuid, flash: Flash) {
        if let Some(session) = self.lock().get_mut(&id) {
            session.flash = Some(flash);
        }
    }

    /// Removes and returns the pending flash message.
    pub fn take_flash(&self, id: Uuid) -> Option<Flash> {
        self.lock().get_mut(&id).and_then(|s| s.flash.take())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `Set-Cookie` value for a session id.
pub fn session_cookie(id: Uuid) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id)
}

/// Extracts the session id from the `Cookie` header(s).
pub fn session_id_from(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use planogram_core::Page;

    fn store() -> SessionStore {
        SessionStore::new(Duration::minutes(30))
    }

    #[test]
    fn test_cookie_parsing() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {}={}", SESSION_COOKIE, id)).unwrap(),
        );
        assert_eq!(session_id_from(&headers), Some(id));

        headers.insert(header::COOKIE, HeaderValue::from_static("planogram_session=garbage"));
        assert_eq!(session_id_from(&headers), None);
    }

    #[test]
    fn test_fresh_session_starts_at_create() {
        let store = store();
        let id = store.resolve(&HeaderMap::new());
        assert_eq!(store.nav(id).current_page(), Page::Create);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_known_session_is_reused() {
        let store = store();
        let now = Utc::now();
        let id = store.resolve_at(None, now);
        store.apply(id, NavAction::Open(Page::List));

        let again = store.resolve_at(Some(id), now + Duration::minutes(5));
        assert_eq!(again, id);
        assert_eq!(store.nav(id).current_page(), Page::List);
    }

    #[test]
    fn test_idle_sessions_are_pruned() {
        let store = store();
        let now = Utc::now();
        let stale = store.resolve_at(None, now);
        store.apply(stale, NavAction::Select(4));

        let later = now + Duration::minutes(31);
        let fresh = store.resolve_at(Some(stale), later);

        assert_ne!(fresh, stale);
        assert_eq!(store.len(), 1);
        assert_eq!(store.nav(fresh).current_page(), Page::Create);
    }

    #[test]
    fn test_flash_is_one_shot() {
        let store = store();
        let id = store.resolve(&HeaderMap::new());
        store.set_flash(id, Flash::success("Saved"));

        assert_eq!(store.take_flash(id), Some(Flash::success("Saved")));
        assert_eq!(store.take_flash(id), None);
    }

    #[test]
    fn test_apply_all_forgets_everywhere() {
        let store = store();
        let a = store.resolve(&HeaderMap::new());
        let b = store.resolve(&HeaderMap::new());
        store.apply(a, NavAction::Select(9));
        store.apply(b, NavAction::Select(9));

        store.apply_all(NavAction::Forget(9));

        assert_eq!(store.nav(a).current_page(), Page::List);
        assert_eq!(store.nav(b).selected(), None);
    }
}
