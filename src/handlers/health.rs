use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{error, instrument, trace};

use crate::schemas::{ApiError, AppState, HealthResponse, api_error};

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 500, description = "Database unreachable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    trace!("Pinging database");
    if let Err(db_error) = state.db.ping().await {
        error!("Health check failed: {}", db_error);
        return Err(api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "DATABASE_UNAVAILABLE",
            "Database is not reachable",
        ));
    }

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: "connected".to_string(),
    }))
}
