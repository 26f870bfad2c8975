//! Browser automation boundary

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// Handle to an element located on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Engine-specific reference used for follow-up interactions
    pub handle: String,
    /// Selector or text the element was located by
    pub selector: String,
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Element {
    pub fn new(handle: impl Into<String>, selector: impl Into<String>, visible: bool) -> Self {
        Self {
            handle: handle.into(),
            selector: selector.into(),
            visible,
            text: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Operations a browser driver must expose to run compiled steps.
///
/// `get` and `contains` return `Ok(None)` while nothing matches; callers
/// poll them until the element shows up.
#[async_trait]
pub trait AutomationEngine: Send + Sync {
    async fn visit(&self, url: &str) -> Result<(), EngineError>;

    async fn get(&self, selector: &str) -> Result<Option<Element>, EngineError>;

    /// First element whose text contains `text`
    async fn contains(&self, text: &str) -> Result<Option<Element>, EngineError>;

    async fn click(&self, element: &Element) -> Result<(), EngineError>;

    async fn type_text(&self, element: &Element, text: &str) -> Result<(), EngineError>;

    async fn wait(&self, ms: u64) -> Result<(), EngineError>;
}
