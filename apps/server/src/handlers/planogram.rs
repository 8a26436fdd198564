//! # Planogram Form Handlers
//!
//! Create, update, select and delete. Each one records its outcome as a
//! flash message and redirects back to `/`.

use axum::extract::{Multipart, Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use tracing::{debug, info};
use uuid::Uuid;

use planogram_core::validation::parse_planogram_id;
use planogram_core::{NavAction, NewPlanogram, PlanogramId, PlanogramUpdate};

use super::{back_home, PlanogramForm};
use crate::error::ApiError;
use crate::state::{AppState, Flash};

/// Stores a new planogram. Stays on the create page either way.
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let session = state.sessions.resolve(&headers);

    let flash = match create_from(&state, multipart).await {
        Ok(id) => {
            info!(id = id, "Planogram created");
            Flash::success("Planogram saved")
        }
        Err(err) => {
            debug!(error = %err, "Planogram not created");
            Flash::error(err.message)
        }
    };

    state.sessions.set_flash(session, flash);
    back_home(session)
}

async fn create_from(state: &AppState, multipart: Multipart) -> Result<PlanogramId, ApiError> {
    let form = PlanogramForm::read(multipart).await?;
    let image = form.image_bytes()?.unwrap_or_default();

    let new = NewPlanogram {
        name: form.name,
        image,
        store: form.store,
        aisle: form.aisle,
        shelf: form.shelf,
    };

    Ok(state.db.planograms().create(&new).await?)
}

/// Saves the edit form. The image is replaced only when a file was chosen.
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
    multipart: Multipart,
) -> Response {
    let session = state.sessions.resolve(&headers);

    let result = match parse_planogram_id(&raw_id) {
        Ok(id) => update_from(&state, id, multipart).await.map(|()| id),
        Err(err) => Err(err.into()),
    };

    match result {
        Ok(id) => {
            info!(id = id, "Planogram updated");
            state.sessions.set_flash(session, Flash::success("Planogram updated"));
        }
        Err(err) => report_failure(&state, session, &raw_id, err),
    }

    back_home(session)
}

async fn update_from(state: &AppState, id: PlanogramId, multipart: Multipart) -> Result<(), ApiError> {
    let form = PlanogramForm::read(multipart).await?;
    let image = form.image_bytes()?;

    let changes = PlanogramUpdate {
        name: form.name,
        image,
        store: form.store,
        aisle: form.aisle,
        shelf: form.shelf,
    };

    Ok(state.db.planograms().update(id, &changes).await?)
}

/// "Edit" on a list row.
pub async fn select(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Response {
    let session = state.sessions.resolve(&headers);

    match parse_planogram_id(&raw_id) {
        Ok(id) => {
            state.sessions.apply(session, NavAction::Select(id));
            debug!(session = %session, id = id, "Selected planogram");
        }
        Err(err) => report_failure(&state, session, &raw_id, err.into()),
    }

    back_home(session)
}

/// "Delete" on a list row.
pub async fn delete(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Response {
    let session = state.sessions.resolve(&headers);

    let result = match parse_planogram_id(&raw_id) {
        Ok(id) => state
            .db
            .planograms()
            .delete(id)
            .await
            .map(|()| id)
            .map_err(ApiError::from),
        Err(err) => Err(err.into()),
    };

    match result {
        Ok(id) => {
            info!(id = id, "Planogram deleted");
            state.sessions.apply_all(NavAction::Forget(id));
            state.sessions.set_flash(session, Flash::success("Planogram deleted"));
        }
        Err(err) => report_failure(&state, session, &raw_id, err),
    }

    back_home(session)
}

/// Flashes the error; a vanished record is also dropped from navigation.
fn report_failure(state: &AppState, session: Uuid, raw_id: &str, err: ApiError) {
    debug!(id = %raw_id, error = %err, "Planogram action failed");

    if err.is_not_found() {
        if let Ok(id) = parse_planogram_id(raw_id) {
            state.sessions.apply(session, NavAction::Forget(id));
        }
    }

    state.sessions.set_flash(session, Flash::error(err.message));
}
