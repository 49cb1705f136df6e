//! HTTP client for the orchestration backend.
//!
//! One call per submission: `POST /api/run` with the user goal, decoded into
//! an explicit acknowledgement. There is no retry, backoff, or cancellation;
//! a failed call is terminal for that submission and reported to the caller.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Request body for `/api/run`.
#[derive(Debug, Serialize)]
struct RunRequest<'a> {
    user_goal: &'a str,
}

/// Acknowledgement returned by a successful run.
///
/// `final_output` is optional on the wire; callers apply their own fallback
/// when it is absent.
#[derive(Debug, Clone, Deserialize)]
pub struct RunAck {
    /// Final output text produced by the agent system.
    pub final_output: Option<String>,
    /// Agent steps recorded during the run, in execution order.
    #[serde(default)]
    pub events: Vec<AgentStep>,
    /// Server-created session holding this exchange.
    pub session_id: String,
}

/// One orchestration step, produced by the backend and consumed read-only.
///
/// Sequence order is display order. There is no uniqueness constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStep {
    /// Agent that performed the step (planner, executor, critic, supervisor).
    pub agent: String,
    /// What the agent did.
    pub action: String,
    /// Optional free-form detail.
    #[serde(default)]
    pub detail: Option<String>,
    /// Plan step index the action belongs to, when applicable.
    #[serde(default)]
    pub step_index: Option<u32>,
}

/// Client for the orchestration backend.
#[derive(Debug, Clone)]
pub struct OrchestratorClient {
    http: Client,
    base_url: String,
}

impl OrchestratorClient {
    /// Create a client for the given base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The underlying HTTP client, shared by the session endpoints.
    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Submit a goal to the orchestrator and wait for the run to finish.
    ///
    /// Makes a single attempt; any non-2xx status or transport error is
    /// returned as a [`ClientError`].
    pub async fn run_goal(&self, goal: &str) -> Result<RunAck, ClientError> {
        let url = format!("{}/api/run", self.base_url);
        debug!(%url, "submitting goal");

        let response = self
            .http
            .post(&url)
            .json(&RunRequest { user_goal: goal })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::status(status.as_u16(), &body));
        }

        let ack: RunAck = response.json().await.map_err(ClientError::Decode)?;
        debug!(session_id = %ack.session_id, steps = ack.events.len(), "run acknowledged");
        Ok(ack)
    }
}

/// Pull the `detail` field out of a backend error body, falling back to the
/// raw body text.
fn extract_detail(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
            return detail.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no detail provided".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Errors that can occur talking to the orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not complete (connection refused, DNS, etc.).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server rejected the request with a non-success status.
    #[error("orchestrator returned {status}: {detail}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Human-readable detail from the response body.
        detail: String,
    },

    /// A 2xx response carried a body that could not be decoded.
    #[error("could not decode response: {0}")]
    Decode(#[source] reqwest::Error),

    /// The background request task stopped before producing an outcome.
    #[error("request did not complete: {0}")]
    Interrupted(String),
}

impl ClientError {
    /// Build a [`ClientError::Status`] from a status code and response body.
    pub(crate) fn status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            detail: extract_detail(body),
        }
    }
}
