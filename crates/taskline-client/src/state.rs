//! Request lifecycle state.

use serde::{Deserialize, Serialize};

/// Phase of the current (or most recent) submission.
///
/// Exactly one value is active at a time; `Running` holds if and only if a
/// request is in flight. The phase is not persisted anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RequestPhase {
    /// No submission has been made yet.
    #[default]
    Idle,
    /// A request is in flight.
    Running,
    /// The last submission completed successfully.
    Completed,
    /// The last submission failed.
    Error,
}

impl RequestPhase {
    /// Check whether a request is currently in flight.
    pub fn is_in_flight(self) -> bool {
        self == Self::Running
    }
}

impl std::fmt::Display for RequestPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
            Self::Error => write!(f, "error"),
        }
    }
}
