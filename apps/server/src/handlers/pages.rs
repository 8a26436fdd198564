//! # Page Handlers
//!
//! ## Render Flow
//! ```text
//! GET /
//!   │
//!   ▼
//! session.nav.current_page()
//!   ├── Create ──► empty form
//!   ├── List ────► repo.list() ──► rows with thumbnails
//!   └── Detail ──► repo.get(selected)
//!                    ├── Some ──► decode image, QR link, edit form
//!                    └── None ──► Forget(id), "not found" flash, 303 → /
//! ```

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use tracing::{debug, warn};

use planogram_core::{NavAction, Page, PlanogramId};
use planogram_media::decode;

use super::{back_home, html_page};
use crate::error::ApiError;
use crate::state::{AppState, Flash};
use crate::views::{self, ImagePreview};

/// Renders the session's current page.
pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.sessions.resolve(&headers);
    let nav = state.sessions.nav(session);
    let page = nav.current_page();

    debug!(session = %session, page = %page, "GET /");

    let body = match page {
        Page::Create => Ok(views::create_body()),
        Page::List => render_list(&state).await,
        Page::Detail => match nav.selected() {
            Some(id) => match render_detail(&state, id).await {
                Err(err) if err.is_not_found() => {
                    state.sessions.apply(session, NavAction::Forget(id));
                    state.sessions.set_flash(session, Flash::error(err.message));
                    return back_home(session);
                }
                other => other,
            },
            None => Ok(views::create_body()),
        },
    };

    let flash = state.sessions.take_flash(session);
    match body {
        Ok(body) => html_page(
            session,
            StatusCode::OK,
            views::layout(page, flash.as_ref(), &body),
        ),
        Err(err) => {
            warn!(page = %page, error = %err, "Page could not be rendered");
            let flash = Flash::error(err.message.clone());
            html_page(session, err.code.status(), views::layout(page, Some(&flash), ""))
        }
    }
}

async fn render_list(state: &AppState) -> Result<String, ApiError> {
    let rows = state.db.planograms().list().await?;
    Ok(views::list_body(&rows))
}

async fn render_detail(state: &AppState, id: PlanogramId) -> Result<String, ApiError> {
    let record = state
        .db
        .planograms()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Planogram", id))?;

    let preview = match decode(&record.image) {
        Ok(image) => ImagePreview::Ready {
            width: image.width(),
            height: image.height(),
        },
        Err(err) => {
            warn!(id = id, error = %err, "Stored image does not decode");
            ImagePreview::Broken(err.to_string())
        }
    };

    Ok(views::detail_body(&record, &preview, &state.link.url_for(id)))
}

/// Menu navigation.
pub async fn navigate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(page): Path<String>,
) -> Response {
    let session = state.sessions.resolve(&headers);

    match page.parse::<Page>() {
        Ok(page) => {
            let nav = state.sessions.apply(session, NavAction::Open(page));
            debug!(session = %session, page = %nav.current_page(), "Navigated");
        }
        Err(err) => {
            let err = ApiError::from(err);
            state.sessions.set_flash(session, Flash::error(err.message));
        }
    }

    back_home(session)
}
