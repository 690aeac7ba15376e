use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode};

use crate::app::AppServices;

/// Liveness check.
#[utoipa::path(get, path = "/health", tag = "System", responses((status = 200, description = "ok")))]
pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Readiness check: the database must answer.
#[utoipa::path(
    get,
    path = "/health/readiness",
    tag = "System",
    responses(
        (status = 200, description = "ready", body = String),
        (status = 503, description = "database unreachable", body = String)
    )
)]
pub async fn readiness(
    Extension(services): Extension<Arc<AppServices>>,
) -> (StatusCode, &'static str) {
    match services.owners.ping().await {
        Ok(()) => (StatusCode::OK, "ready"),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "database unavailable")
        }
    }
}
