//! Agent discussion endpoint
//!
//! POST /agents/discuss - run one agent invocation against the transcript

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Extension, Json, Router};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use quartet_core::{
    AgentOrchestrator, AgentRequest, AgentResponse, ContextEntry, ResearchData, TokenInfo,
};
use quartet_core::role::ACCEPTED_ROLES;

use super::ErrorBody;

/// Request body for one agent invocation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussRequest {
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub agent_role: String,
    #[serde(default)]
    pub context: Vec<ContextEntry>,
    #[serde(default)]
    pub demo_mode: bool,
    #[serde(default)]
    pub previous_research: Option<ResearchData>,
}

/// Response body for one agent invocation. Audio is base64-encoded for JSON
/// transport.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub truncated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub research_data: Option<ResearchData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_data: Option<String>,
    pub token_info: TokenInfo,
}

impl From<AgentResponse> for DiscussResponse {
    fn from(response: AgentResponse) -> Self {
        Self {
            message: response.message,
            warning: response.warning,
            truncated: response.truncated,
            research_data: response.research,
            audio_data: response.audio.map(|bytes| BASE64.encode(&bytes)),
            token_info: response.token_info,
        }
    }
}

/// Run one agent invocation
async fn discuss(
    Extension(orchestrator): Extension<Arc<AgentOrchestrator>>,
    Json(request): Json<DiscussRequest>,
) -> Result<Json<DiscussResponse>, (StatusCode, Json<ErrorBody>)> {
    let agent_request = AgentRequest::new(request.transcript, request.agent_role)
        .with_context(request.context)
        .with_demo_mode(request.demo_mode)
        .with_previous_research(request.previous_research);

    match orchestrator.run_agent(agent_request).await {
        Ok(response) => Ok(Json(response.into())),
        Err(e) if e.is_client_error() => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: e.to_string(),
                accepted_roles: Some(ACCEPTED_ROLES),
            }),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody::new(e.to_string())),
        )),
    }
}

/// Create agent routes
pub fn agents_routes() -> Router {
    Router::new().route("/agents/discuss", post(discuss))
}
