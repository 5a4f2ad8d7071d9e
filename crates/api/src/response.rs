//! Shared response envelope types for API handlers.
//!
//! Site responses use a `{ "data": ... }` envelope; paginated listings add a
//! `page` object. Use these instead of ad-hoc `serde_json::json!` bodies.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use pantry_core::pagination::Page;
use pantry_core::types::DbId;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": [...], "page": {...} }` envelope for paginated listings.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub data: Vec<T>,
    pub page: Page,
}

/// Current values of an edit form, returned by `GET .../edit`.
#[derive(Debug, Serialize)]
pub struct FormView<T: Serialize> {
    pub id: DbId,
    pub form: T,
}

/// Body of `GET .../delete`: what would be deleted. Nothing is removed.
#[derive(Debug, Serialize)]
pub struct DeleteConfirmation {
    pub id: DbId,
    pub object: String,
    pub message: String,
}

impl DeleteConfirmation {
    pub fn new(id: DbId, object: impl Into<String>) -> Self {
        let object = object.into();
        Self {
            id,
            message: format!("Are you sure you want to delete \"{object}\"?"),
            object,
        }
    }
}

/// `201 Created` with a `Location` header pointing at the new resource.
pub fn created<T: Serialize>(location: &str, data: T) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location.to_string())],
        Json(DataResponse { data }),
    )
        .into_response()
}

/// `303 See Other` to `location`, the answer to a successful delete.
pub fn see_other(location: &str) -> Response {
    (StatusCode::SEE_OTHER, [(header::LOCATION, location.to_string())]).into_response()
}
