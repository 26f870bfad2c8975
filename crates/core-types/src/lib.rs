//! Shared primitives for the scenario compiler, the action executor and the
//! tool host.

mod action;
mod retry;
mod scenario;

pub use action::{field_selector, Action, ActionOp};
pub use retry::RetryPolicy;
pub use scenario::Scenario;

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Errors raised while constructing core values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid retry policy: {0}")]
    InvalidPolicy(String),
}

#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
