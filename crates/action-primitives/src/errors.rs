//! Error types for action primitives

use thiserror::Error;

/// Failures reported by an [`AutomationEngine`](crate::AutomationEngine).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Page could not be loaded
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// Element refused a click or keystrokes
    #[error("Interaction failed: {0}")]
    Interaction(String),

    /// Element lookup failed inside the engine
    #[error("Query failed: {0}")]
    Query(String),

    /// Uncaught exception raised by the application under test
    #[error("Application error: {0}")]
    Application(String),

    /// Link to the browser driver broke
    #[error("Engine I/O error: {0}")]
    Io(String),
}

impl EngineError {
    /// Application-side exceptions do not invalidate the browser session.
    pub fn is_non_fatal(&self) -> bool {
        matches!(self, EngineError::Application(_))
    }
}

/// Errors surfaced by primitives, retries and playback steps.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Element did not become visible in time
    #[error("Timed out after {timeout_ms}ms waiting for '{selector}' to be visible")]
    Timeout { selector: String, timeout_ms: u64 },

    /// Expected content is missing from the page
    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    /// Step is missing a required field
    #[error("Invalid step: {0}")]
    InvalidStep(String),
}

impl ActionError {
    /// Check if another attempt could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ActionError::Engine(EngineError::Io(_)) => false,
            ActionError::Engine(_) | ActionError::Timeout { .. } => true,
            ActionError::AssertionFailed(_) => true,
            ActionError::InvalidStep(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_names_selector() {
        let err = ActionError::Timeout {
            selector: "#save".to_string(),
            timeout_ms: 250,
        };
        assert_eq!(
            err.to_string(),
            "Timed out after 250ms waiting for '#save' to be visible"
        );
        assert!(err.is_retryable());
    }

    #[test]
    fn engine_errors_pass_through() {
        let err: ActionError = EngineError::Interaction("detached".to_string()).into();
        assert_eq!(err.to_string(), "Interaction failed: detached");
        assert!(!ActionError::InvalidStep("no target".into()).is_retryable());
        assert!(!ActionError::from(EngineError::Io("closed".into())).is_retryable());
    }

    #[test]
    fn only_application_errors_are_non_fatal() {
        assert!(EngineError::Application("boom".into()).is_non_fatal());
        assert!(!EngineError::Navigation("404".into()).is_non_fatal());
    }
}
