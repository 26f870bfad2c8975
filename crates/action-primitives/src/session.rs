//! Automation session: one engine plus the knobs steps run under

use std::future::Future;
use std::sync::Arc;

use scenario_core_types::{RetryPolicy, SessionId};
use tracing::warn;

use crate::engine::{AutomationEngine, Element};
use crate::errors::{ActionError, EngineError};
use crate::retry::{retry, Retried};
use crate::waiting::{wait_and_get, wait_for_text, DEFAULT_WAIT_TIMEOUT_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Swallow uncaught application exceptions instead of failing the step
    pub ignore_non_fatal_errors: bool,
    pub retry: RetryPolicy,
    pub wait_timeout_ms: u64,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            ignore_non_fatal_errors: false,
            retry: RetryPolicy::default(),
            wait_timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
        }
    }
}

#[derive(Clone)]
pub struct AutomationSession {
    id: SessionId,
    engine: Arc<dyn AutomationEngine>,
    options: SessionOptions,
}

impl AutomationSession {
    pub fn new(engine: Arc<dyn AutomationEngine>, options: SessionOptions) -> Self {
        Self {
            id: SessionId::new(),
            engine,
            options,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn engine(&self) -> &dyn AutomationEngine {
        self.engine.as_ref()
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub async fn visit(&self, url: &str) -> Result<(), ActionError> {
        self.absorb(self.engine.visit(url).await)
    }

    pub async fn click(&self, element: &Element) -> Result<(), ActionError> {
        self.absorb(self.engine.click(element).await)
    }

    pub async fn type_text(&self, element: &Element, text: &str) -> Result<(), ActionError> {
        self.absorb(self.engine.type_text(element, text).await)
    }

    pub async fn contains(&self, text: &str) -> Result<Option<Element>, ActionError> {
        self.absorb(self.engine.contains(text).await)
    }

    pub async fn wait(&self, ms: u64) -> Result<(), ActionError> {
        self.absorb(self.engine.wait(ms).await)
    }

    /// [`wait_and_get`] with the session timeout
    pub async fn wait_and_get(&self, selector: &str) -> Result<Element, ActionError> {
        wait_and_get(self.engine(), selector, self.options.wait_timeout_ms).await
    }

    /// [`wait_for_text`] with the session timeout
    pub async fn wait_for_text(&self, text: &str) -> Result<Element, ActionError> {
        wait_for_text(self.engine(), text, self.options.wait_timeout_ms).await
    }

    /// Run `operation` under the session retry policy.
    pub async fn retry<T, F, Fut>(&self, operation: F) -> Result<Retried<T>, ActionError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ActionError>>,
    {
        retry(self.options.retry, operation).await
    }

    fn absorb<T: Default>(&self, result: Result<T, EngineError>) -> Result<T, ActionError> {
        match result {
            Err(err) if self.options.ignore_non_fatal_errors && err.is_non_fatal() => {
                warn!(session = %self.id, error = %err, "ignoring application error");
                Ok(T::default())
            }
            other => other.map_err(ActionError::from),
        }
    }
}

impl std::fmt::Debug for AutomationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutomationSession")
            .field("id", &self.id)
            .field("options", &self.options)
            .finish()
    }
}
