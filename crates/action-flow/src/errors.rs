//! Flow execution error types

use action_primitives::ActionError;
use thiserror::Error;

/// Flow execution errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// Step failed after every attempt
    #[error("Step {index} ({operation}) failed: {reason}")]
    StepFailed {
        index: usize,
        operation: String,
        reason: String,
    },

    /// Command verb is not one of visit, click, type, contains
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Command verb is known but its arguments are missing
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Action primitive error
    #[error(transparent)]
    Action(#[from] ActionError),
}

pub type FlowResult<T> = Result<T, FlowError>;
