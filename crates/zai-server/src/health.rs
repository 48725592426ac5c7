use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    status: &'static str,
}

/// Liveness probe; reports healthy whenever the process can answer
pub async fn health_handler() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}
