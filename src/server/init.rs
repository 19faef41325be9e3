//! Collaborator construction and server startup
//!
//! Every external-service client is constructed exactly once here and
//! shared by reference for the life of the process. A missing API key never
//! prevents startup: the affected collaborator degrades per the
//! orchestrator's failure rules, and `/health` reports whether the model is
//! configured.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use quartet_core::AgentOrchestrator;
use quartet_llm::{AnthropicConfig, AnthropicProvider, LlmProvider};
use quartet_search::{BraveConfig, BraveSearch, SearchClient};
use quartet_speech::{ElevenLabsBackend, TtsBackend};
use quartet_store::CommandStore;

use crate::api;
use crate::server::config::AppConfig;

/// Shared handles built once at startup.
pub struct Collaborators {
    pub orchestrator: Arc<AgentOrchestrator>,
    pub store: Arc<CommandStore>,
    pub model_configured: bool,
}

/// Build all collaborator handles from config and environment.
pub async fn build_collaborators(config: &AppConfig) -> Result<Collaborators> {
    let store = Arc::new(
        CommandStore::from_path(Path::new(&config.store.path))
            .await
            .context("failed to open command store")?,
    );

    let model_configured = std::env::var("ANTHROPIC_API_KEY").is_ok();
    let llm: Arc<dyn LlmProvider> = match AnthropicProvider::from_env() {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            warn!(error = %e, "model provider not configured; agent calls will fail until it is");
            Arc::new(AnthropicProvider::new(AnthropicConfig::new(""))?)
        }
    };

    let search: Arc<dyn SearchClient> = match BraveSearch::from_env() {
        Ok(client) => Arc::new(client),
        Err(e) => {
            warn!(error = %e, "search not configured; research will be skipped");
            Arc::new(BraveSearch::new(BraveConfig::new(""))?)
        }
    };

    let tts: Arc<dyn TtsBackend> = Arc::new(ElevenLabsBackend::from_env()?);
    if !tts.is_available() {
        warn!("speech synthesis not configured; responses will be text-only");
    }

    let orchestrator = Arc::new(AgentOrchestrator::new(llm, search, tts, store.clone()));

    Ok(Collaborators {
        orchestrator,
        store,
        model_configured,
    })
}

/// Run the HTTP server until shutdown.
pub async fn run(config: AppConfig) -> Result<()> {
    let collaborators = build_collaborators(&config).await?;
    let app = api::router(collaborators);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("listening on http://{addr}");
    axum::serve(listener, app).await.context("server error")
}
