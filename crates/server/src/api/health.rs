//! Liveness endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::jobs::JobCounts;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub service: String,
    pub version: String,
    /// Parses completed since startup, including evicted jobs.
    pub docs_processed: u64,
    /// Jobs per state among the records still held.
    pub jobs: JobCounts,
    #[schema(value_type = Object)]
    pub config: serde_json::Value,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        service: "PD Parser API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        docs_processed: state.jobs.processed(),
        jobs: state.jobs.counts(),
        config: state.config.redacted_summary(),
    })
}
