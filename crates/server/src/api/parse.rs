//! PDF upload, job status, and cancellation endpoints.

use std::sync::Arc;

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use pdparse_core::ParsedDocument;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::jobs::{CancelOutcome, Job, JobState, Outcome};
use crate::state::AppState;

use super::{api_error, job_error, ApiError, ErrorBody};

// ── Types ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, IntoParams)]
pub struct ParseQuery {
    /// Return immediately with a job ID instead of waiting for the result.
    /// Defaults to the server's `PARSE_BACKGROUND_DEFAULT`.
    pub background: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ParseResponse {
    pub success: bool,
    pub doc_id: Uuid,
    /// `completed` or `processing`.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub data: Option<ParsedDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub success: bool,
    pub doc_id: Uuid,
    pub filename: String,
    /// `processing` while queued or running, else the terminal state.
    pub status: String,
    pub job_state: JobState,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub data: Option<ParsedDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<Job> for StatusResponse {
    fn from(job: Job) -> Self {
        Self {
            success: true,
            doc_id: job.id,
            filename: job.filename,
            status: job.state.wire_status().to_string(),
            job_state: job.state,
            created_at: job.created_at,
            started_at: job.started_at,
            finished_at: job.finished_at,
            data: job.result,
            message: job.error,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CancelResponse {
    pub success: bool,
    pub doc_id: Uuid,
    pub status: String,
}

// ── Upload ───────────────────────────────────────────────────────

/// Upload a program-definition PDF for parsing.
///
/// Takes the multipart field named `file`, or the first field carrying a
/// filename. With `background=false` the request waits for the parse.
#[utoipa::path(
    post,
    path = "/api/parse-pdf",
    tag = "Parsing",
    params(ParseQuery),
    request_body(content_type = "multipart/form-data", description = "PDF file in a `file` field"),
    responses(
        (status = 200, description = "Parsed, or queued in background mode", body = ParseResponse),
        (status = 400, description = "Missing file or not a PDF", body = ErrorBody),
        (status = 409, description = "Cancelled while waiting", body = ErrorBody),
        (status = 413, description = "Upload too large", body = ErrorBody),
        (status = 500, description = "Parse failed", body = ErrorBody),
        (status = 504, description = "Parse exceeded the time limit", body = ErrorBody)
    )
)]
pub async fn parse_pdf(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ParseQuery>,
    mut multipart: Multipart,
) -> Result<Json<ParseResponse>, ApiError> {
    let (filename, bytes) = read_upload(&mut multipart).await?;
    if !filename.to_lowercase().ends_with(".pdf") {
        return Err(api_error(StatusCode::BAD_REQUEST, "Only PDF files are supported"));
    }

    let background = query
        .background
        .unwrap_or(state.config.jobs.background_by_default);
    info!(file = %filename, size = bytes.len(), background, "Received PDF upload");

    let (doc_id, handle) = state.pool.submit(filename, bytes);
    if background {
        return Ok(Json(ParseResponse {
            success: true,
            doc_id,
            status: JobState::Queued.wire_status().to_string(),
            data: None,
            message: Some("Document queued for parsing".to_string()),
        }));
    }

    let outcome = handle.await.map_err(|e| {
        job_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            Some(doc_id),
            JobState::Failed.wire_status(),
            format!("Error processing PDF: {e}"),
        )
    })?;

    let code = match &outcome {
        Outcome::Completed(_) => StatusCode::OK,
        Outcome::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        Outcome::TimedOut => StatusCode::GATEWAY_TIMEOUT,
        Outcome::Cancelled => StatusCode::CONFLICT,
    };
    let status = outcome.state().wire_status();
    match outcome {
        Outcome::Completed(doc) => Ok(Json(ParseResponse {
            success: true,
            doc_id,
            status: status.to_string(),
            data: Some(doc),
            message: None,
        })),
        Outcome::Failed(reason) => Err(job_error(code, Some(doc_id), status, format!("Error processing PDF: {reason}"))),
        Outcome::TimedOut => Err(job_error(code, Some(doc_id), status, "Parsing exceeded the time limit")),
        Outcome::Cancelled => Err(job_error(code, Some(doc_id), status, "Parsing was cancelled")),
    }
}

async fn read_upload(multipart: &mut Multipart) -> Result<(String, Vec<u8>), ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") && field.file_name().is_none() {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;
        return Ok((filename, bytes.to_vec()));
    }
    Err(api_error(StatusCode::BAD_REQUEST, "No file provided"))
}

fn multipart_error(e: MultipartError) -> ApiError {
    api_error(e.status(), format!("Invalid upload: {}", e.body_text()))
}

// ── Status ───────────────────────────────────────────────────────

fn not_found() -> ApiError {
    job_error(StatusCode::NOT_FOUND, None, "not_found", "Document not found")
}

/// Unknown, malformed, and evicted IDs all read as not found.
fn lookup_id(doc_id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(doc_id).map_err(|_| not_found())
}

#[utoipa::path(
    get,
    path = "/api/parse-status/{doc_id}",
    tag = "Parsing",
    params(("doc_id" = String, Path, description = "Job ID returned by the upload")),
    responses(
        (status = 200, description = "Current job state", body = StatusResponse),
        (status = 404, description = "Unknown or evicted job", body = ErrorBody)
    )
)]
pub async fn parse_status(
    State(state): State<Arc<AppState>>,
    Path(doc_id): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    let id = lookup_id(&doc_id)?;
    let job = state.jobs.get(&id).ok_or_else(not_found)?;
    Ok(Json(StatusResponse::from(job)))
}

#[utoipa::path(
    delete,
    path = "/api/parse-status/{doc_id}",
    tag = "Parsing",
    params(("doc_id" = String, Path, description = "Job ID returned by the upload")),
    responses(
        (status = 200, description = "Job cancelled", body = CancelResponse),
        (status = 404, description = "Unknown or evicted job", body = ErrorBody),
        (status = 409, description = "Job already finished", body = ErrorBody)
    )
)]
pub async fn cancel_parse(
    State(state): State<Arc<AppState>>,
    Path(doc_id): Path<String>,
) -> Result<Json<CancelResponse>, ApiError> {
    let id = lookup_id(&doc_id)?;
    match state.pool.cancel(&id) {
        CancelOutcome::Cancelled => Ok(Json(CancelResponse {
            success: true,
            doc_id: id,
            status: JobState::Cancelled.wire_status().to_string(),
        })),
        CancelOutcome::AlreadyFinished(finished) => Err(job_error(
            StatusCode::CONFLICT,
            Some(id),
            finished.wire_status(),
            format!("Job already {}", finished.wire_status()),
        )),
        CancelOutcome::NotFound => Err(not_found()),
    }
}
