//! taskline CLI: Terminal client for a multi-agent task orchestrator

use clap::{Parser, Subcommand};
use std::path::Path;
use taskline_client::{
    ClientError, Config, OrchestratorClient, FALLBACK_OUTPUT, TASKLINE_DIR,
};
use taskline_tui::widgets::step_line;

/// Chat with a multi-agent task orchestration backend
#[derive(Parser)]
#[command(name = "taskline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Orchestrator base URL (overrides the configured endpoint)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Tui,

    /// Submit a goal and print the final output with the agent timeline
    Run {
        /// The goal for the agent system
        goal: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List recent sessions
    Sessions {
        /// Maximum number of sessions to list
        #[arg(long)]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one session with its messages
    Session {
        /// Session identifier
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a session permanently
    Delete {
        /// Session identifier
        id: String,
    },

    /// Check backend health
    Health {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let config_path = Path::new(TASKLINE_DIR).join("config.json");
    let mut config = Config::load_or_default(&config_path);
    if let Some(endpoint) = cli.endpoint {
        config.base_url = endpoint;
    }

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

    match cli.command {
        None | Some(Commands::Tui) => {
            // Default: open TUI
            if let Err(e) = rt.block_on(taskline_tui::run_tui(&config)) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Run { goal, json }) => {
            exit_on_error(rt.block_on(cmd_run(&config, &goal, json)));
        }
        Some(Commands::Sessions { limit, json }) => {
            let limit = limit.unwrap_or(config.session_limit);
            exit_on_error(rt.block_on(cmd_sessions(&config, limit, json)));
        }
        Some(Commands::Session { id, json }) => {
            exit_on_error(rt.block_on(cmd_session(&config, &id, json)));
        }
        Some(Commands::Delete { id }) => {
            exit_on_error(rt.block_on(cmd_delete(&config, &id)));
        }
        Some(Commands::Health { json }) => {
            exit_on_error(rt.block_on(cmd_health(&config, json)));
        }
    }
}

fn exit_on_error(result: Result<(), ClientError>) {
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn cmd_run(config: &Config, goal: &str, json: bool) -> Result<(), ClientError> {
    let goal = goal.trim();
    if goal.is_empty() {
        eprintln!("Error: goal is empty");
        std::process::exit(1);
    }

    let client = OrchestratorClient::new(&config.base_url);
    let ack = client.run_goal(goal).await?;

    if json {
        let output = serde_json::json!({
            "final_output": ack.final_output,
            "events": ack.events,
            "session_id": ack.session_id,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).expect("failed to serialize")
        );
        return Ok(());
    }

    println!("{}", ack.final_output.as_deref().unwrap_or(FALLBACK_OUTPUT));

    if !ack.events.is_empty() {
        println!("\nAgent timeline:");
        for step in &ack.events {
            println!("  {}", step_line(step));
        }
    }

    println!("\nSession: {}", ack.session_id);
    Ok(())
}

async fn cmd_sessions(config: &Config, limit: usize, json: bool) -> Result<(), ClientError> {
    let client = OrchestratorClient::new(&config.base_url);
    let sessions = client.list_sessions(limit).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&sessions).expect("failed to serialize")
        );
        return Ok(());
    }

    if sessions.is_empty() {
        println!("No sessions");
        return Ok(());
    }

    for session in &sessions {
        println!(
            "{}  {}  ({} message(s), updated {})",
            session.id,
            session.title,
            session.message_count,
            session.updated_at.format("%Y-%m-%d %H:%M")
        );
    }
    println!("\n{} session(s)", sessions.len());
    Ok(())
}

async fn cmd_session(config: &Config, id: &str, json: bool) -> Result<(), ClientError> {
    let client = OrchestratorClient::new(&config.base_url);
    let session = client.get_session(id).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&session).expect("failed to serialize")
        );
        return Ok(());
    }

    println!("{}\n", session.title);
    for message in &session.messages {
        println!(
            "[{}] {}: {}",
            message.timestamp.format("%H:%M"),
            message.role,
            message.content
        );
    }
    Ok(())
}

async fn cmd_delete(config: &Config, id: &str) -> Result<(), ClientError> {
    let client = OrchestratorClient::new(&config.base_url);
    client.delete_session(id).await?;
    println!("Deleted session {id}");
    Ok(())
}

async fn cmd_health(config: &Config, json: bool) -> Result<(), ClientError> {
    let client = OrchestratorClient::new(&config.base_url);
    let health = client.health().await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&health).expect("failed to serialize")
        );
        return Ok(());
    }

    println!("Status: {}", health.status);
    println!("Version: {}", health.version);
    if let Some(message) = &health.message {
        println!("{message}");
    }
    Ok(())
}
