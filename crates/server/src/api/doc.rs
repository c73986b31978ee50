//! OpenAPI documentation aggregator.
//!
//! Collects the `#[utoipa::path]` handlers and `ToSchema` types into one
//! OpenAPI 3.1 document, served via Scalar UI at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PD Parser API",
        version = "0.1.0",
        description = "Extracts structured curriculum data from program-definition PDFs.",
    ),
    tags(
        (name = "Health", description = "Liveness and job counters"),
        (name = "Parsing", description = "PDF upload, job status, and cancellation"),
        (name = "Validation", description = "Shape checks on document JSON"),
    ),
    paths(
        crate::api::health::health,
        crate::api::parse::parse_pdf,
        crate::api::parse::parse_status,
        crate::api::parse::cancel_parse,
        crate::api::validate::validate_pd_data,
    ),
    components(schemas(
        crate::api::ErrorBody,
        crate::api::health::HealthResponse,
        crate::api::parse::ParseResponse,
        crate::api::parse::StatusResponse,
        crate::api::parse::CancelResponse,
        crate::api::validate::ValidateResponse,
        crate::jobs::JobState,
        crate::jobs::JobCounts,
    ))
)]
pub struct ApiDoc;
