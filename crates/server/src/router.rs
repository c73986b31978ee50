//! HTTP router construction.
//!
//! Assembles the Axum routes, middleware, and OpenAPI docs into a single `Router`.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::api;
use crate::state::AppState;

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.server.max_upload_bytes();
    let cors = cors_layer(&state.config.server.cors_origin);

    Router::new()
        .route("/api/health", get(api::health))
        .route("/api/parse-pdf", post(api::parse_pdf))
        .route(
            "/api/parse-status/{doc_id}",
            get(api::parse_status).delete(api::cancel_parse),
        )
        .route("/api/validate-pd-data", post(api::validate_pd_data))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .with_state(state)
        .merge(Scalar::with_url("/docs", api::ApiDoc::openapi()))
}

/// `*` allows any origin; otherwise a comma-separated origin list.
fn cors_layer(origins: &str) -> CorsLayer {
    if origins.trim() == "*" {
        return CorsLayer::permissive();
    }
    let allowed: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %o, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
