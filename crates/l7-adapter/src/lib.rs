//! L7 adapter: exposes the tool dispatcher to MCP clients over stdio.

pub mod errors;
pub mod mcp;
pub mod ports;
pub mod schema;
pub mod trace;

pub use errors::{AdapterError, AdapterResult};
pub use mcp::{McpServeReport, McpServer, ServerInfo};
pub use ports::{DispatcherPort, NoopDispatcher, ToolCall, ToolOutcome};
pub use schema::ToolDescriptor;
pub use trace::AdapterTracer;
