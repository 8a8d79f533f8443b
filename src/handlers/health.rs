use axum::{
    http::StatusCode,
    response::Json,
};
use tracing::info;

use crate::config::Config;
use crate::error::AppResult;
use crate::models::HealthResponse;

/// Health check endpoint
pub async fn health_handler() -> AppResult<Json<HealthResponse>> {
    info!("Health check requested");

    let endpoint_configured = Config::endpoint_configured();
    let status = if endpoint_configured {
        "healthy"
    } else {
        "degraded"
    };

    info!(
        status = status,
        endpoint_configured = endpoint_configured,
        "Health check completed"
    );

    Ok(Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        endpoint_configured,
    }))
}

/// Readiness check: uploads cannot succeed without an endpoint.
pub async fn ready_handler() -> Result<StatusCode, StatusCode> {
    if Config::endpoint_configured() {
        info!("Readiness check passed");
        Ok(StatusCode::OK)
    } else {
        info!("Readiness check failed - analysis endpoint not configured");
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}
