//! Health check endpoint.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` while the stage loop accepts commands, `degraded` after it stopped.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Whether the stage loop is still running.
    pub stage_running: bool,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let stage_running = !state.stage.is_closed();
    Json(HealthResponse {
        status: if stage_running { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        stage_running,
    })
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
