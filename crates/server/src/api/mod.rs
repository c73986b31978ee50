//! HTTP endpoint modules.
//!
//! Handlers return `ApiError` for anything that is not a 2xx so every error
//! body has the same `{success: false, ...}` shape.

mod doc;
mod health;
mod parse;
mod validate;


use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

// ── Shared types ─────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub message: String,
}

pub(crate) type ApiError = (StatusCode, Json<ErrorBody>);

pub(crate) fn api_error(code: StatusCode, message: impl Into<String>) -> ApiError {
    (
        code,
        Json(ErrorBody {
            success: false,
            doc_id: None,
            status: None,
            message: message.into(),
        }),
    )
}

/// Error that also reports a job's status string.
pub(crate) fn job_error(
    code: StatusCode,
    doc_id: Option<Uuid>,
    status: &str,
    message: impl Into<String>,
) -> ApiError {
    (
        code,
        Json(ErrorBody {
            success: false,
            doc_id,
            status: Some(status.to_string()),
            message: message.into(),
        }),
    )
}

// ── Re-exports ───────────────────────────────────────────────────

pub use doc::ApiDoc;
pub use health::health;
pub use parse::{cancel_parse, parse_pdf, parse_status};
pub use validate::validate_pd_data;
