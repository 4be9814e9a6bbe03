use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::inbound::http::router::AppState;

pub const SERVICE_MESSAGE: &str = "Balaji Store Backend is running";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
    pub version: String,
    pub environment: String,
    /// `connected`, or `error: <detail>` when the store probe fails.
    pub database: String,
}

/// Always `200`; store trouble is reported in `database`, not the status.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.store_probe.ping().await {
        Ok(()) => "connected".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Store probe failed");
            format!("error: {e}")
        }
    };

    Json(HealthResponse {
        success: true,
        message: SERVICE_MESSAGE.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.environment.to_string(),
        database,
    })
}
