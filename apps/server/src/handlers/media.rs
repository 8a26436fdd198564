//! # Image and QR Routes
//!
//! Both routes answer with raw bytes on success and a JSON `ApiError`
//! otherwise, so a broken image only breaks its own `<img>` tag.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use planogram_core::validation::parse_planogram_id;
use planogram_media::decode;

use crate::error::ApiError;
use crate::state::AppState;

/// Stored image bytes, served only if they decode as PNG or JPEG.
pub async fn image(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_planogram_id(&raw_id)?;

    let bytes = state
        .db
        .planograms()
        .image(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Planogram", id))?;

    let decoded = decode(&bytes)?;
    debug!(id = id, mime = decoded.mime_type(), "Serving planogram image");

    Ok(([(header::CONTENT_TYPE, decoded.mime_type())], bytes).into_response())
}

/// QR code PNG for the record link.
pub async fn qr_code(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_planogram_id(&raw_id)?;

    if !state.db.planograms().exists(id).await? {
        return Err(ApiError::not_found("Planogram", id));
    }

    let png = state.qr.encode(&state.link.url_for(id))?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}
