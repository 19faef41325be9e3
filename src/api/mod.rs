//! HTTP API for the Quartet backend
//!
//! Routes:
//! - `POST /agents/discuss` — run one agent invocation
//! - `POST /commands`, `GET /commands`, `GET /commands/recent/:limit`,
//!   `POST /commands/search` — persisted turn history
//! - `GET /health` — liveness + model configuration status

pub mod agents;
pub mod commands;
pub mod health;

use axum::{Extension, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::server::Collaborators;

pub use agents::agents_routes;
pub use commands::commands_routes;
pub use health::health_routes;

/// Status shared with the health endpoint.
#[derive(Debug, Clone)]
pub struct ServerStatus {
    pub model_configured: bool,
}

/// Error body returned on 4xx/5xx responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_roles: Option<&'static [&'static str]>,
}

impl ErrorBody {
    /// Plain error with no role listing.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            accepted_roles: None,
        }
    }
}

/// Assemble the full application router over shared collaborator handles.
pub fn router(collaborators: Collaborators) -> Router {
    let status = ServerStatus {
        model_configured: collaborators.model_configured,
    };

    Router::new()
        .merge(agents_routes())
        .merge(commands_routes())
        .merge(health_routes())
        .layer(Extension(collaborators.orchestrator))
        .layer(Extension(collaborators.store))
        .layer(Extension(status))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
