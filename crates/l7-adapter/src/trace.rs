use std::borrow::Cow;

use tracing::{span, Level, Span};
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct AdapterTracer {
    pub component: Cow<'static, str>,
}

impl AdapterTracer {
    pub fn new(component: impl Into<Cow<'static, str>>) -> Self {
        Self {
            component: component.into(),
        }
    }

    /// Span for one JSON-RPC request; `tool` is empty outside `tools/call`.
    pub fn span(&self, method: &str, tool: &str) -> Span {
        span!(
            Level::INFO,
            "l7.adapter.mcp",
            method = method,
            tool = tool,
            trace_id = %Uuid::new_v4(),
            component = %self.component
        )
    }
}
