//! Command-line interface

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::server;

/// Quartet: a four-agent discussion backend for voice-driven build requests
#[derive(Debug, Parser)]
#[command(name = "quartet", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run one full agent turn from the terminal and print each stage
    Discuss {
        /// The build request or question
        transcript: String,
        /// Use the fast model and concise prompts
        #[arg(long)]
        demo: bool,
        /// If the turn ends research-only, run a second turn with the
        /// findings applied
        #[arg(long)]
        research: bool,
    },
}

/// Dispatch a parsed CLI invocation.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Command::Discuss {
            transcript,
            demo,
            research,
        }) => discuss(&transcript, demo, research).await,
        Some(Command::Serve { port }) => serve(port).await,
        None => serve(None).await,
    }
}

async fn serve(port_override: Option<u16>) -> Result<()> {
    let mut config = server::AppConfig::load()?;
    if let Some(port) = port_override {
        config.server.port = port;
    }
    info!("Starting Quartet v{}", env!("CARGO_PKG_VERSION"));
    server::run(config).await
}

/// Drive the full pipeline once and print stage-by-stage output.
async fn discuss(transcript: &str, demo: bool, apply_research: bool) -> Result<()> {
    let config = server::AppConfig::load()?;
    let deps = server::build_collaborators(&config).await?;

    let mut outcome = deps.orchestrator.run_turn(transcript, demo, None).await?;
    if outcome.research_only && apply_research {
        let findings = outcome.stages[0].response.research.clone();
        println!("── Research ──");
        println!("{}\n", outcome.stages[0].response.message);
        outcome = deps.orchestrator.run_turn(transcript, demo, findings).await?;
    }

    for stage in &outcome.stages {
        println!("── {} ──", stage.role.label());
        println!("{}\n", stage.response.message);
        if let Some(warning) = &stage.response.warning {
            println!("  [warning] {warning}\n");
        }
    }

    if outcome.research_only {
        println!("(research only; run again with the findings applied to continue)");
    } else {
        let saved = deps
            .store
            .save(transcript, &outcome.agent_messages())
            .await;
        match saved {
            Ok(record) => println!("(saved as command {})", record.id),
            Err(e) => println!("(warning: history was not saved: {e})"),
        }
    }

    Ok(())
}
