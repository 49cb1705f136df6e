//! taskline-client: Headless core for the taskline orchestrator client
//!
//! This crate provides the non-terminal logic for taskline, including:
//! - The conversation controller (message history, request lifecycle)
//! - The orchestrator HTTP client (`/api/run`, sessions, health)
//! - Configuration management

pub mod api;
pub mod config;
pub mod controller;
pub mod message;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use api::{AgentStep, ClientError, OrchestratorClient, RunAck};
pub use config::{Config, ConfigError, TASKLINE_DIR};
pub use controller::{Controller, ConversationEvent, SubmitError, FALLBACK_OUTPUT};
pub use message::{Message, Role};
pub use session::{Health, SessionDetail, SessionMessage, SessionSummary};
pub use state::RequestPhase;

/// Returns the client version.
pub fn client_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_version() {
        let version = client_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}
