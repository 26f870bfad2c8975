//! Wait-until-visible primitive

use std::time::Duration;

use tokio::time::{sleep, timeout};
use tracing::{debug, trace, warn};

use crate::engine::{AutomationEngine, Element};
use crate::errors::ActionError;

pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy)]
enum Probe<'a> {
    Selector(&'a str),
    Text(&'a str),
}

impl Probe<'_> {
    fn subject(&self) -> &str {
        match self {
            Probe::Selector(subject) | Probe::Text(subject) => subject,
        }
    }
}

/// Poll `selector` until the element exists and is visible.
///
/// Fails with [`ActionError::Timeout`] naming the selector once `timeout_ms`
/// elapses. Engine errors during polling count as "not there yet".
pub async fn wait_and_get(
    engine: &dyn AutomationEngine,
    selector: &str,
    timeout_ms: u64,
) -> Result<Element, ActionError> {
    wait_visible(engine, Probe::Selector(selector), timeout_ms).await
}

/// Same as [`wait_and_get`] but locates the element by its text.
pub async fn wait_for_text(
    engine: &dyn AutomationEngine,
    text: &str,
    timeout_ms: u64,
) -> Result<Element, ActionError> {
    wait_visible(engine, Probe::Text(text), timeout_ms).await
}

async fn wait_visible(
    engine: &dyn AutomationEngine,
    probe: Probe<'_>,
    timeout_ms: u64,
) -> Result<Element, ActionError> {
    debug!(subject = probe.subject(), timeout_ms, "waiting for element");

    match timeout(
        Duration::from_millis(timeout_ms),
        poll_until_visible(engine, probe),
    )
    .await
    {
        Ok(element) => Ok(element),
        Err(_) => {
            warn!(
                subject = probe.subject(),
                timeout_ms, "element not visible before timeout"
            );
            Err(ActionError::Timeout {
                selector: probe.subject().to_string(),
                timeout_ms,
            })
        }
    }
}

async fn poll_until_visible(engine: &dyn AutomationEngine, probe: Probe<'_>) -> Element {
    loop {
        let found = match probe {
            Probe::Selector(selector) => engine.get(selector).await,
            Probe::Text(text) => engine.contains(text).await,
        };

        match found {
            Ok(Some(element)) if element.visible => return element,
            Ok(Some(_)) => trace!(subject = probe.subject(), "element present but hidden"),
            Ok(None) => trace!(subject = probe.subject(), "element not present"),
            Err(err) => debug!(subject = probe.subject(), error = %err, "lookup failed"),
        }

        sleep(POLL_INTERVAL).await;
    }
}
