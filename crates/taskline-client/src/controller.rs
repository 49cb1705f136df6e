//! The conversation controller.
//!
//! Owns the append-only message history, the request lifecycle phase, and the
//! agent steps from the most recent run. All mutation happens through
//! [`Controller::begin`] / [`Controller::resolve`] (or the inline
//! [`Controller::submit`]); every mutation notifies subscribers so renderers
//! can stay pure projections of controller state.

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::api::{AgentStep, ClientError, OrchestratorClient, RunAck};
use crate::message::{Message, Role};
use crate::state::RequestPhase;

/// Assistant content used when a successful run carries no output text.
pub const FALLBACK_OUTPUT: &str = "The orchestrator returned no output.";

/// Notification sent to subscribers on every controller mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationEvent {
    /// A message was appended to the history.
    MessageAppended(Role),
    /// The request phase changed.
    PhaseChanged(RequestPhase),
}

/// Reasons a submission is rejected before any side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The goal was empty after trimming.
    #[error("goal is empty")]
    EmptyGoal,

    /// A request is already in flight.
    #[error("a request is already in flight")]
    RequestInFlight,
}

/// Conversation controller for one orchestrator endpoint.
#[derive(Debug)]
pub struct Controller {
    client: OrchestratorClient,
    messages: Vec<Message>,
    phase: RequestPhase,
    last_steps: Vec<AgentStep>,
    subscribers: Vec<mpsc::UnboundedSender<ConversationEvent>>,
}

impl Controller {
    /// Create a controller talking to the given client.
    pub fn new(client: OrchestratorClient) -> Self {
        Self {
            client,
            messages: Vec::new(),
            phase: RequestPhase::Idle,
            last_steps: Vec::new(),
            subscribers: Vec::new(),
        }
    }

    /// The orchestrator client (cheap to clone for background dispatch).
    pub fn client(&self) -> &OrchestratorClient {
        &self.client
    }

    /// Ordered view of all messages appended so far.
    pub fn history(&self) -> &[Message] {
        &self.messages
    }

    /// Current request phase.
    pub fn phase(&self) -> RequestPhase {
        self.phase
    }

    /// Agent steps from the most recent successful run.
    pub fn last_steps(&self) -> &[AgentStep] {
        &self.last_steps
    }

    /// Subscribe to mutation notifications.
    ///
    /// Dropped receivers are pruned on the next notification.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<ConversationEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Accept a submission: validate, append the user message, and enter the
    /// running phase.
    ///
    /// Returns the trimmed goal for dispatch. Rejected submissions (empty
    /// goal, request already in flight) have no side effects. The caller
    /// issues exactly one outbound call per accepted submission and feeds its
    /// outcome back through [`Controller::resolve`].
    pub fn begin(&mut self, text: &str) -> Result<String, SubmitError> {
        let goal = text.trim();
        if goal.is_empty() {
            return Err(SubmitError::EmptyGoal);
        }
        if self.phase.is_in_flight() {
            return Err(SubmitError::RequestInFlight);
        }

        let goal = goal.to_string();
        debug!(goal = %goal, "submission accepted");
        self.append(Message::user(goal.clone()));
        self.set_phase(RequestPhase::Running);
        Ok(goal)
    }

    /// Consume the outcome of the outbound call issued for the last
    /// accepted submission.
    ///
    /// Success appends an assistant message (with [`FALLBACK_OUTPUT`] when
    /// the output field was absent) and retains the run's agent steps;
    /// failure appends an error message. Either way the in-flight flag
    /// clears, so new submissions are permitted again.
    pub fn resolve(&mut self, outcome: Result<RunAck, ClientError>) {
        match outcome {
            Ok(ack) => {
                info!(session_id = %ack.session_id, "run completed");
                let content = ack
                    .final_output
                    .unwrap_or_else(|| FALLBACK_OUTPUT.to_string());
                self.last_steps = ack.events;
                self.append(Message::assistant(content));
                self.set_phase(RequestPhase::Completed);
            }
            Err(err) => {
                info!(error = %err, "run failed");
                self.append(Message::error(err.to_string()));
                self.set_phase(RequestPhase::Error);
            }
        }
    }

    /// Run a full submission cycle inline: begin, one call, resolve.
    pub async fn submit(&mut self, text: &str) -> Result<(), SubmitError> {
        let goal = self.begin(text)?;
        let outcome = self.client.run_goal(&goal).await;
        self.resolve(outcome);
        Ok(())
    }

    fn append(&mut self, message: Message) {
        let role = message.role;
        self.messages.push(message);
        self.notify(ConversationEvent::MessageAppended(role));
    }

    fn set_phase(&mut self, phase: RequestPhase) {
        if self.phase != phase {
            self.phase = phase;
            self.notify(ConversationEvent::PhaseChanged(phase));
        }
    }

    fn notify(&mut self, event: ConversationEvent) {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_controller() -> Controller {
        Controller::new(OrchestratorClient::new("http://localhost:8000"))
    }

    fn ack(output: Option<&str>, events: Vec<AgentStep>) -> RunAck {
        RunAck {
            final_output: output.map(str::to_string),
            events,
            session_id: "s1".into(),
        }
    }

    #[test]
    fn test_empty_submission_is_rejected() {
        let mut controller = test_controller();

        assert_eq!(controller.begin(""), Err(SubmitError::EmptyGoal));
        assert_eq!(controller.begin("   \n\t "), Err(SubmitError::EmptyGoal));
        assert!(controller.history().is_empty());
        assert_eq!(controller.phase(), RequestPhase::Idle);
    }

    #[test]
    fn test_begin_appends_user_message_and_runs() {
        let mut controller = test_controller();

        let goal = controller.begin("  plan a trip  ").unwrap();
        assert_eq!(goal, "plan a trip");
        assert_eq!(controller.history().len(), 1);
        assert_eq!(controller.history()[0].role, Role::User);
        assert_eq!(controller.history()[0].content, "plan a trip");
        assert_eq!(controller.phase(), RequestPhase::Running);
    }

    #[test]
    fn test_overlapping_submission_is_rejected() {
        let mut controller = test_controller();
        controller.begin("first goal").unwrap();

        assert_eq!(
            controller.begin("second goal"),
            Err(SubmitError::RequestInFlight)
        );
        // Nothing appended for the rejected submission
        assert_eq!(controller.history().len(), 1);
        assert_eq!(controller.phase(), RequestPhase::Running);
    }

    #[test]
    fn test_resolve_success_appends_output() {
        let mut controller = test_controller();
        controller.begin("plan a trip").unwrap();

        let steps = vec![AgentStep {
            agent: "planner".into(),
            action: "created plan".into(),
            detail: None,
            step_index: None,
        }];
        controller.resolve(Ok(ack(Some("X"), steps)));

        assert_eq!(controller.history().len(), 2);
        assert_eq!(controller.history()[1].role, Role::Assistant);
        assert_eq!(controller.history()[1].content, "X");
        assert_eq!(controller.phase(), RequestPhase::Completed);
        assert_eq!(controller.last_steps().len(), 1);
    }

    #[test]
    fn test_resolve_missing_output_uses_fallback() {
        let mut controller = test_controller();
        controller.begin("plan a trip").unwrap();
        controller.resolve(Ok(ack(None, Vec::new())));

        assert_eq!(controller.history()[1].content, FALLBACK_OUTPUT);
        assert_eq!(controller.phase(), RequestPhase::Completed);
    }

    #[test]
    fn test_resolve_failure_appends_error_and_recovers() {
        let mut controller = test_controller();
        controller.begin("plan a trip").unwrap();
        controller.resolve(Err(ClientError::Status {
            status: 500,
            detail: "Agent execution failed".into(),
        }));

        assert_eq!(controller.history().len(), 2);
        assert_eq!(controller.history()[1].role, Role::Error);
        assert!(controller.history()[1].content.contains("500"));
        assert!(controller.history()[1]
            .content
            .contains("Agent execution failed"));
        assert_eq!(controller.phase(), RequestPhase::Error);

        // The failure is terminal for that submission only
        assert!(controller.begin("try again").is_ok());
    }

    #[test]
    fn test_history_preserves_submission_order() {
        let mut controller = test_controller();

        controller.begin("first").unwrap();
        controller.resolve(Ok(ack(Some("answer one"), Vec::new())));
        controller.begin("second").unwrap();
        controller.resolve(Ok(ack(Some("answer two"), Vec::new())));

        let roles: Vec<Role> = controller.history().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
        assert_eq!(controller.history()[0].content, "first");
        assert_eq!(controller.history()[3].content, "answer two");
    }

    #[test]
    fn test_subscribers_observe_mutations() {
        let mut controller = test_controller();
        let mut rx = controller.subscribe();

        controller.begin("plan a trip").unwrap();
        controller.resolve(Ok(ack(Some("done"), Vec::new())));

        assert_eq!(
            rx.try_recv().unwrap(),
            ConversationEvent::MessageAppended(Role::User)
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            ConversationEvent::PhaseChanged(RequestPhase::Running)
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            ConversationEvent::MessageAppended(Role::Assistant)
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            ConversationEvent::PhaseChanged(RequestPhase::Completed)
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let mut controller = test_controller();
        let rx = controller.subscribe();
        drop(rx);

        controller.begin("plan a trip").unwrap();
        assert!(controller.subscribers.is_empty());
    }

    #[tokio::test]
    async fn test_submit_full_cycle() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/run"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "final_output": "All done",
                "events": [{"agent": "supervisor", "action": "approved output"}],
                "session_id": "s42"
            })))
            .mount(&server)
            .await;

        let mut controller = Controller::new(OrchestratorClient::new(&server.uri()));
        controller.submit("  do the thing  ").await.unwrap();

        assert_eq!(controller.history().len(), 2);
        assert_eq!(controller.history()[1].content, "All done");
        assert_eq!(controller.phase(), RequestPhase::Completed);
        assert_eq!(controller.last_steps()[0].agent, "supervisor");
    }
}
