mod auth;
mod beneficiary;
mod equipment;
mod rent;
mod report;
mod returned;

pub use self::{auth::*, beneficiary::*, equipment::*, rent::*, report::*, returned::*};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

pub(crate) fn timestamp(time: OffsetDateTime) -> String {
    time.format(&Rfc3339).unwrap_or_else(|_| time.to_string())
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    id: Uuid,
}

impl CreatedResponse {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, axum::Json(self)).into_response()
    }
}

/// JSON body, or 404 when the record does not exist.
pub(crate) fn found<T: Serialize>(record: Option<T>) -> Response {
    match record {
        Some(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
