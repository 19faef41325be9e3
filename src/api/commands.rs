//! Command history endpoints
//!
//! POST /commands - persist a completed turn
//! GET /commands - list all stored turns (bounded)
//! GET /commands/recent/:limit - recency-limited listing
//! POST /commands/search - relevance search with recency fallback

use std::sync::Arc;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use quartet_store::{AgentMessage, CommandRecord, CommandStore};

use super::ErrorBody;

/// Bound on the plain GET /commands listing
const LIST_LIMIT: u32 = 100;

/// Bound on caller-supplied limits
const MAX_LIMIT: u32 = 200;

/// Default search result count
const DEFAULT_SEARCH_LIMIT: u32 = 10;

/// Request body for persisting a completed turn.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveCommandRequest {
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub agent_responses: Vec<AgentMessage>,
    /// Accepted for wire compatibility but always discarded; the store
    /// assigns the timestamp at write time.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Request body for relevance search.
#[derive(Debug, Deserialize)]
pub struct SearchCommandsRequest {
    #[serde(default)]
    pub query: String,
    pub limit: Option<u32>,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn internal_error(e: impl std::fmt::Display) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new(e.to_string())),
    )
}

/// Persist a completed turn
async fn save_command(
    Extension(store): Extension<Arc<CommandStore>>,
    Json(request): Json<SaveCommandRequest>,
) -> Result<Json<CommandRecord>, ApiError> {
    if request.transcript.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new("transcript must not be empty")),
        ));
    }
    if request.timestamp.is_some() {
        debug!("ignoring client-supplied timestamp; the store assigns its own");
    }

    let record = store
        .save(&request.transcript, &request.agent_responses)
        .await
        .map_err(internal_error)?;
    Ok(Json(record))
}

/// List stored turns
async fn list_commands(
    Extension(store): Extension<Arc<CommandStore>>,
) -> Result<Json<Vec<CommandRecord>>, ApiError> {
    let records = store.list_recent(LIST_LIMIT).await.map_err(internal_error)?;
    Ok(Json(records))
}

/// Recency-limited listing
async fn list_recent_commands(
    Extension(store): Extension<Arc<CommandStore>>,
    Path(limit): Path<u32>,
) -> Result<Json<Vec<CommandRecord>>, ApiError> {
    let limit = limit.clamp(1, MAX_LIMIT);
    let records = store.list_recent(limit).await.map_err(internal_error)?;
    Ok(Json(records))
}

/// Relevance search, falling back to the recency listing when the search
/// path fails
async fn search_commands(
    Extension(store): Extension<Arc<CommandStore>>,
    Json(request): Json<SearchCommandsRequest>,
) -> Result<Json<Vec<CommandRecord>>, ApiError> {
    let limit = request.limit.unwrap_or(DEFAULT_SEARCH_LIMIT).clamp(1, MAX_LIMIT);

    match store.search_relevant(&request.query, limit).await {
        Ok(records) => Ok(Json(records)),
        Err(e) => {
            warn!(error = %e, "relevance search failed; serving recency listing");
            let records = store.list_recent(limit).await.map_err(internal_error)?;
            Ok(Json(records))
        }
    }
}

/// Create command routes
pub fn commands_routes() -> Router {
    Router::new()
        .route("/commands", post(save_command).get(list_commands))
        .route("/commands/recent/:limit", get(list_recent_commands))
        .route("/commands/search", post(search_commands))
}
