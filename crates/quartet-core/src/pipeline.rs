//! Pipeline driver — one full turn across the four roles.
//!
//! Stage ordering: architect runs alone first (later roles need its output);
//! backend and frontend are independent of each other and are issued as a
//! joined pair; qa runs last with all three entries in context. Context
//! entries are appended in fixed pipeline order, never completion order, so
//! a turn is deterministic regardless of which of the pair finishes first.

use tracing::{debug, instrument};

use quartet_store::AgentMessage;

use crate::error::Result;
use crate::orchestrator::AgentOrchestrator;
use crate::research::ResearchData;
use crate::role::AgentRole;
use crate::types::{AgentRequest, AgentResponse, ContextEntry};

/// One completed pipeline stage.
#[derive(Debug, Clone)]
pub struct TurnStage {
    /// The role that ran
    pub role: AgentRole,
    /// Its response
    pub response: AgentResponse,
}

/// The result of driving one full turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// Completed stages in pipeline order
    pub stages: Vec<TurnStage>,
    /// Whether the turn ended at the architect's research short-circuit
    pub research_only: bool,
}

impl TurnOutcome {
    /// The stages shaped for persistence.
    #[must_use]
    pub fn agent_messages(&self) -> Vec<AgentMessage> {
        self.stages
            .iter()
            .map(|stage| AgentMessage::new(stage.role.label(), &stage.response.message))
            .collect()
    }
}

impl AgentOrchestrator {
    /// Drive a full four-stage turn for one transcript.
    ///
    /// `previous_research` is threaded into the architect stage only. If the
    /// architect short-circuits with fresh research, the turn ends there and
    /// the caller decides whether to come back with the research attached.
    #[instrument(skip(self, previous_research), fields(demo = demo_mode))]
    pub async fn run_turn(
        &self,
        transcript: &str,
        demo_mode: bool,
        previous_research: Option<ResearchData>,
    ) -> Result<TurnOutcome> {
        let architect = self
            .run_agent(
                AgentRequest::new(transcript, AgentRole::Architect.as_str())
                    .with_demo_mode(demo_mode)
                    .with_previous_research(previous_research),
            )
            .await?;

        if architect.is_research_only() {
            debug!("turn ended at research short-circuit");
            return Ok(TurnOutcome {
                stages: vec![TurnStage {
                    role: AgentRole::Architect,
                    response: architect,
                }],
                research_only: true,
            });
        }

        let mut context = vec![ContextEntry::new(
            AgentRole::Architect.label(),
            &architect.message,
        )];

        // Backend and frontend are independent; issue them as a joined pair
        let (backend, frontend) = tokio::join!(
            self.run_agent(
                AgentRequest::new(transcript, AgentRole::Backend.as_str())
                    .with_demo_mode(demo_mode)
                    .with_context(context.clone()),
            ),
            self.run_agent(
                AgentRequest::new(transcript, AgentRole::Frontend.as_str())
                    .with_demo_mode(demo_mode)
                    .with_context(context.clone()),
            ),
        );
        let backend = backend?;
        let frontend = frontend?;

        // Fixed insertion order, not arrival order
        context.push(ContextEntry::new(
            AgentRole::Backend.label(),
            &backend.message,
        ));
        context.push(ContextEntry::new(
            AgentRole::Frontend.label(),
            &frontend.message,
        ));

        let qa = self
            .run_agent(
                AgentRequest::new(transcript, AgentRole::Qa.as_str())
                    .with_demo_mode(demo_mode)
                    .with_context(context),
            )
            .await?;

        Ok(TurnOutcome {
            stages: vec![
                TurnStage {
                    role: AgentRole::Architect,
                    response: architect,
                },
                TurnStage {
                    role: AgentRole::Backend,
                    response: backend,
                },
                TurnStage {
                    role: AgentRole::Frontend,
                    response: frontend,
                },
                TurnStage {
                    role: AgentRole::Qa,
                    response: qa,
                },
            ],
            research_only: false,
        })
    }
}
