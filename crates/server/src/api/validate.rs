//! Shape checks on caller-supplied document JSON.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use super::{api_error, ApiError, ErrorBody};

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidateResponse {
    pub success: bool,
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// `{total_courses, total_errors, total_warnings}`
    #[schema(value_type = Object)]
    pub statistics: pdparse_extract::validate::ValidationStatistics,
}

#[utoipa::path(
    post,
    path = "/api/validate-pd-data",
    tag = "Validation",
    request_body(content = Object, description = "Parsed document JSON, possibly hand-edited"),
    responses(
        (status = 200, description = "Validation report", body = ValidateResponse),
        (status = 400, description = "Body is not JSON", body = ErrorBody)
    )
)]
pub async fn validate_pd_data(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ValidateResponse>, ApiError> {
    let Json(data) = payload.map_err(|e| {
        api_error(StatusCode::BAD_REQUEST, format!("Validation failed: {}", e.body_text()))
    })?;

    let report = pdparse_extract::validate(&data);
    Ok(Json(ValidateResponse {
        success: true,
        valid: report.valid,
        errors: report.errors,
        warnings: report.warnings,
        statistics: report.statistics,
    }))
}
