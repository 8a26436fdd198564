//! # JSON API
//!
//! Read-only endpoints for scripts and integrations. Image bytes are never
//! inlined; clients follow `imageUrl` / `qrUrl`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::warn;

use planogram_core::validation::parse_planogram_id;
use planogram_core::{PlanogramId, PlanogramSummary};
use planogram_db::MigrationStatus;
use planogram_media::decode;

use crate::error::ApiError;
use crate::state::AppState;

/// Planogram row for list responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanogramSummaryDto {
    pub id: PlanogramId,
    pub name: String,
    pub store: String,
    pub aisle: String,
    pub shelf: String,
    pub caption: String,
    pub image_url: String,
    pub qr_url: String,
}

impl From<PlanogramSummary> for PlanogramSummaryDto {
    fn from(s: PlanogramSummary) -> Self {
        PlanogramSummaryDto {
            caption: s.caption(),
            image_url: format!("/planograms/{}/image", s.id),
            qr_url: format!("/planograms/{}/qr.png", s.id),
            id: s.id,
            name: s.name,
            store: s.store,
            aisle: s.aisle,
            shelf: s.shelf,
        }
    }
}

/// Single planogram with image metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanogramDto {
    #[serde(flatten)]
    pub summary: PlanogramSummaryDto,
    pub record_url: String,
    pub image_bytes: usize,
    /// `None` when the stored bytes do not decode.
    pub image: Option<ImageMetaDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetaDto {
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    pub database: bool,
    /// `None` when the migration table cannot be read.
    pub migrations: Option<MigrationsDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MigrationsDto {
    pub total: usize,
    pub applied: usize,
}

impl From<MigrationStatus> for MigrationsDto {
    fn from(status: MigrationStatus) -> Self {
        MigrationsDto {
            total: status.total,
            applied: status.applied,
        }
    }
}

/// `GET /api/planograms`
pub async fn list_planograms(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlanogramSummaryDto>>, ApiError> {
    let rows = state.db.planograms().list().await?;
    Ok(Json(rows.into_iter().map(PlanogramSummaryDto::from).collect()))
}

/// `GET /api/planograms/{id}`
pub async fn get_planogram(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<PlanogramDto>, ApiError> {
    let id = parse_planogram_id(&raw_id)?;

    let record = state
        .db
        .planograms()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Planogram", id))?;

    let image = decode(&record.image).ok().map(|decoded| ImageMetaDto {
        mime_type: decoded.mime_type().to_string(),
        width: decoded.width(),
        height: decoded.height(),
    });

    Ok(Json(PlanogramDto {
        record_url: state.link.url_for(id),
        image_bytes: record.image.len(),
        image,
        summary: record.summary().into(),
    }))
}

/// `GET /health`
///
/// 503 unless the database answers and every embedded migration is applied.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthDto>) {
    let database = state.db.health_check().await;

    let migrations = match state.db.migration_status().await {
        Ok(status) => Some(status),
        Err(err) => {
            warn!(error = %err, "Migration status unavailable");
            None
        }
    };

    let healthy = database && migrations.is_some_and(|m| m.is_current());
    let (code, status) = if healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(HealthDto {
            status,
            database,
            migrations: migrations.map(MigrationsDto::from),
        }),
    )
}
