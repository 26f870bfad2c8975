//! Playback report types

use chrono::{DateTime, Utc};
use scenario_core_types::ActionOp;
use serde::{Deserialize, Serialize};

use crate::errors::{FlowError, FlowResult};

/// What playback does once a step has exhausted its attempts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStrategy {
    /// Stop and return the step's error
    #[default]
    Abort,
    /// Record the failure and move on to the next step
    Continue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Passed,
    Failed,
    Skipped,
}

/// Outcome of one played step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
    pub index: usize,
    pub operation: ActionOp,
    pub annotation: String,
    pub status: StepStatus,
    pub attempts: u32,
    pub started_at: DateTime<Utc>,
    pub latency_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of a whole playback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackReport {
    pub session_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub steps: Vec<StepReport>,
}

impl PlaybackReport {
    pub fn new(session_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            session_id: session_id.into(),
            started_at: now,
            finished_at: now,
            steps: Vec::new(),
        }
    }

    pub fn success(&self) -> bool {
        self.steps
            .iter()
            .all(|step| step.status != StepStatus::Failed)
    }

    pub fn failed_steps(&self) -> impl Iterator<Item = &StepReport> {
        self.steps
            .iter()
            .filter(|step| step.status == StepStatus::Failed)
    }

    pub fn total_attempts(&self) -> u32 {
        self.steps.iter().map(|step| step.attempts).sum()
    }

    /// First failed step as an error.
    pub fn ensure_success(&self) -> FlowResult<()> {
        match self.failed_steps().next() {
            Some(step) => Err(FlowError::StepFailed {
                index: step.index,
                operation: step.operation.to_string(),
                reason: step.error.clone().unwrap_or_default(),
            }),
            None => Ok(()),
        }
    }

    pub(crate) fn finish(mut self) -> Self {
        self.finished_at = Utc::now();
        self
    }
}
