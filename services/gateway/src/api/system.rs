//! System/health API handlers.
//!
//! # Purpose and responsibility
//! Lightweight endpoints for liveness probes, storage health and service
//! metadata. All are read-only and need no caller subjects.
use crate::api::error::{ApiError, api_unavailable};
use crate::api::types::{HealthStatus, SystemInfo};
use crate::app::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

#[utoipa::path(
    get,
    path = "/status",
    tag = "system",
    responses((status = 200, description = "Process is up"))
)]
pub(crate) async fn status() -> StatusCode {
    StatusCode::OK
}

#[utoipa::path(
    get,
    path = "/v2/system/info",
    tag = "system",
    responses(
        (status = 200, description = "Storage backend and API version", body = SystemInfo)
    )
)]
pub(crate) async fn system_info(State(state): State<AppState>) -> Json<SystemInfo> {
    let store = state.handler.store();
    Json(SystemInfo {
        backend: store.backend_name().to_string(),
        durable: store.is_durable(),
        api_version: state.api_version.clone(),
    })
}

#[utoipa::path(
    get,
    path = "/v2/system/health",
    tag = "system",
    responses(
        (status = 200, description = "Registry storage healthy", body = HealthStatus),
        (status = 503, description = "Registry storage unavailable", body = crate::api::types::ErrorResponse)
    )
)]
/// Probe the registry backend.
///
/// # Errors
/// - Returns 503 when the storage health check fails.
pub(crate) async fn system_health(
    State(state): State<AppState>,
) -> Result<Json<HealthStatus>, ApiError> {
    if !state.handler.store().health_check().await {
        return Err(api_unavailable("storage unavailable"));
    }
    Ok(Json(HealthStatus {
        status: "ok".to_string(),
    }))
}
