//! # Request Handlers
//!
//! One handler per user action.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  pages      GET /                     render the session's page        │
//! │             POST /nav/{page}          menu navigation                  │
//! │  planogram  POST /planograms          create                           │
//! │             POST /planograms/{id}     update                           │
//! │             POST /planograms/{id}/select                               │
//! │             POST /planograms/{id}/delete                               │
//! │  media      GET /planograms/{id}/image                                 │
//! │             GET /planograms/{id}/qr.png                                │
//! │  api        GET /api/planograms[/{id}], GET /health                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mutating routes always answer `303 See Other` to `/` and report their
//! outcome through the session flash.

pub mod api;
pub mod media;
pub mod pages;
pub mod planogram;

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use uuid::Uuid;

use planogram_core::validation::validate_image_file_name;

use crate::error::ApiError;
use crate::state::session_cookie;

/// `303 See Other` to `/`, refreshing the session cookie.
pub(crate) fn back_home(session: Uuid) -> Response {
    (
        [(header::SET_COOKIE, session_cookie(session))],
        Redirect::to("/"),
    )
        .into_response()
}

/// Rendered HTML page, refreshing the session cookie.
pub(crate) fn html_page(session: Uuid, status: StatusCode, html: String) -> Response {
    (
        status,
        [(header::SET_COOKIE, session_cookie(session))],
        Html(html),
    )
        .into_response()
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::validation(format!("Upload rejected: {}", err.body_text()))
    }
}

/// An uploaded image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Fields of the create and edit forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PlanogramForm {
    pub name: String,
    pub store: String,
    pub aisle: String,
    pub shelf: String,
    pub image: Option<Upload>,
}

impl PlanogramForm {
    /// Reads the multipart body.
    ///
    /// A file input left empty arrives as a part with no file name and no
    /// bytes; it is treated as "no image". Unknown parts are ignored.
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = PlanogramForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "image" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await?;
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    form.image = Some(Upload {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
                "name" => form.name = field.text().await?,
                "store" => form.store = field.text().await?,
                "aisle" => form.aisle = field.text().await?,
                "shelf" => form.shelf = field.text().await?,
                _ => {}
            }
        }

        Ok(form)
    }

    /// Checks the upload's extension and returns its bytes.
    pub fn image_bytes(&self) -> Result<Option<Vec<u8>>, ApiError> {
        match &self.image {
            Some(upload) => {
                validate_image_file_name(&upload.file_name)?;
                Ok(Some(upload.bytes.clone()))
            }
            None => Ok(None),
        }
    }
}
