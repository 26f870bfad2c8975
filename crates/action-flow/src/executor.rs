//! Flow executor implementation

use std::time::Instant;

use action_primitives::{ActionError, AutomationSession, RetryExecution};
use async_trait::async_trait;
use chrono::Utc;
use scenario_core_types::{field_selector, Action, ActionOp};
use tracing::{debug, info, warn};

use crate::command::expect_text;
use crate::errors::FlowResult;
use crate::types::{FailureStrategy, PlaybackReport, StepReport, StepStatus};

/// Flow executor trait
#[async_trait]
pub trait FlowExecutor: Send + Sync {
    /// Play compiled steps in order
    async fn play(&self, actions: &[Action]) -> FlowResult<PlaybackReport>;
}

/// Plays each step through the session, retrying under its policy.
#[derive(Debug, Clone)]
pub struct DefaultFlowExecutor {
    session: AutomationSession,
    strategy: FailureStrategy,
}

impl DefaultFlowExecutor {
    pub fn new(session: AutomationSession) -> Self {
        Self {
            session,
            strategy: FailureStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: FailureStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn session(&self) -> &AutomationSession {
        &self.session
    }

    async fn play_step(&self, index: usize, action: &Action) -> StepReport {
        let started_at = Utc::now();
        let start = Instant::now();
        let mut report = StepReport {
            index,
            operation: action.operation(),
            annotation: action.annotation().to_string(),
            status: StepStatus::Passed,
            attempts: 0,
            started_at,
            latency_ms: 0,
            error: None,
        };

        if action.operation() == ActionOp::Placeholder {
            info!(step = index, "{}", action.annotation());
            report.status = StepStatus::Skipped;
            return report;
        }

        debug!(step = index, action = %action, "playing step");
        let mut execution = RetryExecution::new(self.session.options().retry);
        let outcome = execution
            .run_if(|| self.execute_action_once(action), ActionError::is_retryable)
            .await;

        report.attempts = execution.attempts_made();
        report.latency_ms = start.elapsed().as_millis() as u64;
        if let Err(err) = outcome {
            warn!(step = index, attempts = report.attempts, error = %err, "step failed");
            report.status = StepStatus::Failed;
            report.error = Some(err.to_string());
        }
        report
    }

    /// Execute action once (without retry)
    async fn execute_action_once(&self, action: &Action) -> Result<(), ActionError> {
        let session = &self.session;

        match action.operation() {
            ActionOp::Navigate => session.visit(required(action.target(), "URL")?).await,
            ActionOp::Click => {
                let element = session
                    .wait_for_text(required(action.target(), "label")?)
                    .await?;
                session.click(&element).await
            }
            ActionOp::Input => {
                let selector = field_selector(required(action.target(), "field")?);
                let element = session.wait_and_get(&selector).await?;
                session
                    .type_text(&element, required(action.value(), "text")?)
                    .await
            }
            ActionOp::AssertVisible => session
                .wait_for_text(required(action.target(), "text")?)
                .await
                .map(|_| ()),
            ActionOp::AssertExists => {
                expect_text(session, required(action.target(), "text")?).await
            }
            ActionOp::Wait => {
                let ms = action
                    .wait_ms()
                    .ok_or_else(|| ActionError::InvalidStep("wait needs a duration".into()))?;
                session.wait(ms).await
            }
            ActionOp::Placeholder => Ok(()),
        }
    }
}

fn required<'a>(field: Option<&'a str>, what: &str) -> Result<&'a str, ActionError> {
    field.ok_or_else(|| ActionError::InvalidStep(format!("missing {what}")))
}

#[async_trait]
impl FlowExecutor for DefaultFlowExecutor {
    async fn play(&self, actions: &[Action]) -> FlowResult<PlaybackReport> {
        info!(
            session = %self.session.id(),
            steps = actions.len(),
            strategy = ?self.strategy,
            "starting playback"
        );
        let mut report = PlaybackReport::new(self.session.id().to_string());
        let mut aborted = false;

        for (index, action) in actions.iter().enumerate() {
            if aborted {
                report.steps.push(StepReport {
                    index,
                    operation: action.operation(),
                    annotation: action.annotation().to_string(),
                    status: StepStatus::Skipped,
                    attempts: 0,
                    started_at: Utc::now(),
                    latency_ms: 0,
                    error: None,
                });
                continue;
            }

            let step = self.play_step(index, action).await;
            if step.status == StepStatus::Failed && self.strategy == FailureStrategy::Abort {
                warn!(step = index, "aborting playback");
                aborted = true;
            }
            report.steps.push(step);
        }

        let report = report.finish();
        info!(
            success = report.success(),
            attempts = report.total_attempts(),
            "playback finished"
        );
        Ok(report)
    }
}
