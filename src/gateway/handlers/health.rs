//! Health check and fallback handlers

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    Json,
    extract::State,
    http::{StatusCode, Uri},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ApiError;

use super::super::state::AppState;
use super::super::types::Envelope;

/// Crate version plus the git hash captured at build time
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("GIT_HASH"));

/// Health check response data
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: &'static str,
    #[schema(example = "0.1.0+3f2a1bc")]
    pub version: &'static str,
    /// Server timestamp in milliseconds
    #[schema(example = 1703494800000_u64)]
    pub timestamp_ms: u64,
    pub uptime_secs: u64,
    pub dishes: usize,
    pub orders: usize,
}

/// Health check endpoint
///
/// - Healthy: 200 OK + `{data: {status: "ok", ...}}`
/// - Unhealthy (a collection lock is poisoned): 503 + `{data: {status: "unavailable", ...}}`
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service healthy", body = Envelope<HealthResponse>),
        (status = 503, description = "Service unavailable", body = Envelope<HealthResponse>)
    ),
    tag = "System"
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<Envelope<HealthResponse>>) {
    let timestamp_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let counts = state
        .dishes
        .len()
        .and_then(|dishes| Ok((dishes, state.orders.len()?)));

    let (status_code, status, (dishes, orders)) = match counts {
        Ok(counts) => (StatusCode::OK, "ok", counts),
        Err(e) => {
            tracing::error!(error = %e, "health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable", (0, 0))
        }
    };

    (
        status_code,
        Json(Envelope::new(HealthResponse {
            status,
            version: VERSION,
            timestamp_ms,
            uptime_secs: state.started_at.elapsed().as_secs(),
            dishes,
            orders,
        })),
    )
}

/// Fallback for unknown paths
pub async fn path_not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("Path not found: {}", uri.path()))
}
