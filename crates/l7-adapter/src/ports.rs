use crate::errors::{AdapterError, AdapterResult};
use crate::schema::ToolDescriptor;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ToolCall {
    #[serde(rename = "name")]
    pub tool: String,
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl ToolCall {
    pub fn new(tool: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            tool: tool.into(),
            arguments,
        }
    }

    /// String argument that must be present.
    pub fn required_str(&self, key: &str) -> AdapterResult<&str> {
        match self.arguments.get(key) {
            Some(Value::String(value)) => Ok(value),
            Some(_) => Err(AdapterError::InvalidArgument(format!(
                "'{key}' must be a string"
            ))),
            None => Err(AdapterError::InvalidArgument(format!(
                "missing required argument '{key}'"
            ))),
        }
    }
}

/// Plain-text result of a tool; failures are reported in-band.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct ToolOutcome {
    pub text: String,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl ToolOutcome {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

#[async_trait]
pub trait DispatcherPort: Send + Sync {
    fn tools(&self) -> Vec<ToolDescriptor>;

    async fn run_tool(&self, call: ToolCall) -> AdapterResult<ToolOutcome>;
}

pub struct NoopDispatcher;

#[async_trait]
impl DispatcherPort for NoopDispatcher {
    fn tools(&self) -> Vec<ToolDescriptor> {
        Vec::new()
    }

    async fn run_tool(&self, call: ToolCall) -> AdapterResult<ToolOutcome> {
        Err(AdapterError::UnknownTool(call.tool))
    }
}
