//! # Navigation Module
//!
//! The page state machine for one interactive session.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Page Navigation                                  │
//! │                                                                         │
//! │             Open(List)                   Select(id)                     │
//! │   ┌────────┐ ─────────► ┌────────┐ ─────────────────► ┌────────┐       │
//! │   │ Create │            │  List  │                    │ Detail │       │
//! │   └────────┘ ◄───────── └────────┘ ◄───────────────── └────────┘       │
//! │      ▲  (initial)  Open(Create)      Open(List) / Forget(id)  │        │
//! │      │                                                         │        │
//! │      └──────────────────── Open(Create) ──────────────────────┘        │
//! │                                                                         │
//! │  • Repeating the current page is a no-op                               │
//! │  • Detail without a selected id renders as Create                      │
//! │  • No terminal state; a fresh session starts at Create                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `NavState::apply` is a pure function: the server threads one `NavState`
//! per session through its handlers instead of keeping page globals.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::PlanogramId;

// =============================================================================
// Page
// =============================================================================

/// The three pages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    /// Upload form for a new planogram.
    #[default]
    Create,
    /// Every stored planogram with edit/delete actions.
    List,
    /// One planogram: image, QR code, and edit form.
    Detail,
}

impl Page {
    /// All pages in menu order.
    pub const ALL: [Page; 3] = [Page::Create, Page::List, Page::Detail];

    /// Path segment used in `/nav/{page}`.
    pub fn slug(&self) -> &'static str {
        match self {
            Page::Create => "create",
            Page::List => "list",
            Page::Detail => "detail",
        }
    }

    /// Menu label.
    pub fn title(&self) -> &'static str {
        match self {
            Page::Create => "New planogram",
            Page::List => "Planograms",
            Page::Detail => "Edit planogram",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Page {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "create" | "new" => Ok(Page::Create),
            "list" => Ok(Page::List),
            "detail" | "edit" => Ok(Page::Detail),
            other => Err(CoreError::UnknownPage(other.to_string())),
        }
    }
}

// =============================================================================
// Actions
// =============================================================================

/// Inputs that move the session between pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Menu selection.
    Open(Page),

    /// "Edit" on a list row: remember the id and show its detail page.
    Select(PlanogramId),

    /// The record is gone (deleted, or not found on lookup).
    ///
    /// Clears a matching selection; a detail page for it falls back to
    /// the list.
    Forget(PlanogramId),
}

// =============================================================================
// Navigation State
// =============================================================================

/// Per-session navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavState {
    page: Page,
    selected: Option<PlanogramId>,
}

impl NavState {
    /// Initial state of a fresh session: the Create page, nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one action and returns the next state.
    pub fn apply(self, action: NavAction) -> NavState {
        match action {
            NavAction::Open(page) => NavState { page, ..self },

            NavAction::Select(id) => NavState {
                page: Page::Detail,
                selected: Some(id),
            },

            NavAction::Forget(id) => {
                if self.selected != Some(id) {
                    return self;
                }
                let page = match self.page {
                    Page::Detail => Page::List,
                    other => other,
                };
                NavState {
                    page,
                    selected: None,
                }
            }
        }
    }

    /// The page to render.
    ///
    /// Detail needs a selected record; without one it falls back to Create.
    pub fn current_page(&self) -> Page {
        match (self.page, self.selected) {
            (Page::Detail, None) => Page::Create,
            (page, _) => page,
        }
    }

    /// The record picked from the list, if any.
    pub fn selected(&self) -> Option<PlanogramId> {
        self.selected
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_create() {
        let state = NavState::new();
        assert_eq!(state.current_page(), Page::Create);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_menu_navigation() {
        let state = NavState::new().apply(NavAction::Open(Page::List));
        assert_eq!(state.current_page(), Page::List);

        let state = state.apply(NavAction::Open(Page::Create));
        assert_eq!(state.current_page(), Page::Create);
    }

    #[test]
    fn test_repeated_selection_is_noop() {
        let once = NavState::new().apply(NavAction::Open(Page::List));
        let twice = once.apply(NavAction::Open(Page::List));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_select_moves_to_detail() {
        let state = NavState::new()
            .apply(NavAction::Open(Page::List))
            .apply(NavAction::Select(5));
        assert_eq!(state.current_page(), Page::Detail);
        assert_eq!(state.selected(), Some(5));
    }

    #[test]
    fn test_detail_without_selection_falls_back_to_create() {
        let state = NavState::new().apply(NavAction::Open(Page::Detail));
        assert_eq!(state.current_page(), Page::Create);
    }

    #[test]
    fn test_detail_menu_keeps_previous_selection() {
        let state = NavState::new()
            .apply(NavAction::Select(3))
            .apply(NavAction::Open(Page::List))
            .apply(NavAction::Open(Page::Detail));
        assert_eq!(state.current_page(), Page::Detail);
        assert_eq!(state.selected(), Some(3));
    }

    #[test]
    fn test_forget_selected_record_returns_to_list() {
        let state = NavState::new()
            .apply(NavAction::Select(9))
            .apply(NavAction::Forget(9));
        assert_eq!(state.current_page(), Page::List);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_forget_other_record_is_noop() {
        let state = NavState::new().apply(NavAction::Select(9));
        assert_eq!(state.apply(NavAction::Forget(10)), state);
    }

    #[test]
    fn test_forget_from_list_keeps_page() {
        let state = NavState::new()
            .apply(NavAction::Select(2))
            .apply(NavAction::Open(Page::List))
            .apply(NavAction::Forget(2));
        assert_eq!(state.current_page(), Page::List);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_page_parsing() {
        assert_eq!("create".parse::<Page>().unwrap(), Page::Create);
        assert_eq!("LIST".parse::<Page>().unwrap(), Page::List);
        assert_eq!("edit".parse::<Page>().unwrap(), Page::Detail);
        assert!("settings".parse::<Page>().is_err());

        for page in Page::ALL {
            assert_eq!(page.slug().parse::<Page>().unwrap(), page);
        }
    }

    #[test]
    fn test_state_serializes_snake_case() {
        let state = NavState::new().apply(NavAction::Select(1));
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"page":"detail","selected":1}"#);
    }
}
