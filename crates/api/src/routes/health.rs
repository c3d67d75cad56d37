use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `not_configured` when no backing store is set.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub configured: bool,
    pub chat_enabled: bool,
}

/// GET /health -- returns service status and configuration state.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = if state.configured { "ok" } else { "not_configured" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        configured: state.configured,
        chat_enabled: state.chat.is_some(),
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
