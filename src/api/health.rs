//! Health check endpoint

use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::Serialize;

use super::ServerStatus;

/// Health response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_configured: bool,
    pub version: &'static str,
}

/// Simple health check
async fn health_check(Extension(status): Extension<ServerStatus>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model_configured: status.model_configured,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Create health routes
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_serialization() {
        let response = HealthResponse {
            status: "ok",
            model_configured: true,
            version: "0.1.0",
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"modelConfigured\":true"));
        assert!(json.contains("\"status\":\"ok\""));
    }
}
