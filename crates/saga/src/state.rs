//! Saga state machine.

use serde::{Deserialize, Serialize};

/// The state of one booking saga execution.
///
/// State transitions:
/// ```text
/// NotStarted ──► Running ──┬──► Completed
///                          └──► Compensating ──► Failed
/// ```
///
/// Completed corresponds to a CONFIRMED booking, Failed to a CANCELLED
/// one. A compensation step that itself fails does not leave
/// Compensating; the saga still terminates in Failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SagaState {
    /// No events applied yet.
    #[default]
    NotStarted,

    /// Forward steps (hold, confirm) are executing.
    Running,

    /// A step failed and the compensating release is in progress.
    Compensating,

    /// Hold and confirm both succeeded (terminal).
    Completed,

    /// The saga gave up after compensation (terminal).
    Failed,
}

impl SagaState {
    /// Returns true if forward steps may execute.
    pub fn is_running(&self) -> bool {
        matches!(self, SagaState::Running)
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SagaState::Completed | SagaState::Failed)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SagaState::NotStarted => "NotStarted",
            SagaState::Running => "Running",
            SagaState::Compensating => "Compensating",
            SagaState::Completed => "Completed",
            SagaState::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for SagaState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_not_started() {
        assert_eq!(SagaState::default(), SagaState::NotStarted);
    }

    #[test]
    fn only_running_is_running() {
        assert!(SagaState::Running.is_running());
        assert!(!SagaState::NotStarted.is_running());
        assert!(!SagaState::Compensating.is_running());
        assert!(!SagaState::Completed.is_running());
        assert!(!SagaState::Failed.is_running());
    }

    #[test]
    fn terminal_states() {
        assert!(!SagaState::NotStarted.is_terminal());
        assert!(!SagaState::Running.is_terminal());
        assert!(!SagaState::Compensating.is_terminal());
        assert!(SagaState::Completed.is_terminal());
        assert!(SagaState::Failed.is_terminal());
    }

    #[test]
    fn display() {
        assert_eq!(SagaState::Running.to_string(), "Running");
        assert_eq!(SagaState::Compensating.to_string(), "Compensating");
    }

    #[test]
    fn serialization_roundtrip() {
        let state = SagaState::Compensating;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: SagaState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
