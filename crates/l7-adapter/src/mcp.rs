//! MCP host: newline-delimited JSON-RPC 2.0 over stdio

use std::sync::Arc;

use serde_json::{json, Map, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn, Instrument};

use crate::errors::{AdapterError, AdapterResult};
use crate::ports::{DispatcherPort, ToolCall};
use crate::trace::AdapterTracer;

pub const MCP_JSONRPC_VERSION: &str = "2.0";
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";
pub const MCP_ERROR_PARSE: i64 = -32700;
pub const MCP_ERROR_INVALID_REQUEST: i64 = -32600;
pub const MCP_ERROR_METHOD_NOT_FOUND: i64 = -32601;
pub const MCP_ERROR_INVALID_PARAMS: i64 = -32602;
pub const MCP_ERROR_INTERNAL: i64 = -32603;
const MCP_CONTENT_TYPE_TEXT: &str = "text";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct McpServeReport {
    pub processed_frames: usize,
    pub error_count: usize,
}

#[derive(Debug, Clone)]
struct McpJsonRpcRequest {
    /// `None` marks a notification
    id: Option<Value>,
    method: String,
    params: Map<String, Value>,
}

#[derive(Debug, Clone)]
struct McpDispatchError {
    id: Value,
    code: i64,
    message: String,
}

impl McpDispatchError {
    fn new(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            id,
            code,
            message: message.into(),
        }
    }
}

pub struct McpServer {
    dispatcher: Arc<dyn DispatcherPort>,
    tracer: AdapterTracer,
    info: ServerInfo,
}

impl McpServer {
    pub fn new(dispatcher: Arc<dyn DispatcherPort>, info: ServerInfo) -> Self {
        Self {
            dispatcher,
            tracer: AdapterTracer::new("mcp"),
            info,
        }
    }

    /// Serve stdin/stdout until stdin closes.
    pub async fn serve_stdio(&self) -> AdapterResult<McpServeReport> {
        info!(server = %self.info.name, "MCP server running on stdio");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// One JSON value per line in, one response per request line out.
    ///
    /// Only I/O failures end the loop with an error.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> AdapterResult<McpServeReport>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut report = McpServeReport::default();
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            report.processed_frames = report.processed_frames.saturating_add(1);

            let Some(response) = self.handle_frame(&line).await else {
                continue;
            };
            if response.get("error").is_some() {
                report.error_count = report.error_count.saturating_add(1);
            }
            write_jsonrpc_line(&mut writer, &response).await?;
        }

        info!(
            frames = report.processed_frames,
            errors = report.error_count,
            "MCP input closed"
        );
        Ok(report)
    }

    /// Response for one raw frame, or `None` for notifications.
    pub async fn handle_frame(&self, raw: &str) -> Option<Value> {
        let frame = match serde_json::from_str::<Value>(raw) {
            Ok(frame) => frame,
            Err(error) => {
                warn!(%error, "unparseable frame");
                return Some(jsonrpc_error_frame(
                    Value::Null,
                    MCP_ERROR_PARSE,
                    format!("failed to parse mcp frame: {error}"),
                ));
            }
        };

        let request = match parse_jsonrpc_request(&frame) {
            Ok(request) => request,
            Err(error) => return Some(jsonrpc_error_frame(error.id, error.code, error.message)),
        };

        let Some(id) = request.id.clone() else {
            debug!(method = %request.method, "notification received");
            return None;
        };

        let tool = request
            .params
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let span = self.tracer.span(&request.method, tool);
        let outcome = self.dispatch(id.clone(), &request).instrument(span).await;

        Some(match outcome {
            Ok(result) => jsonrpc_result_frame(id, result),
            Err(error) => jsonrpc_error_frame(error.id, error.code, error.message),
        })
    }

    async fn dispatch(
        &self,
        id: Value,
        request: &McpJsonRpcRequest,
    ) -> Result<Value, McpDispatchError> {
        match request.method.as_str() {
            "initialize" => Ok(self.handle_initialize()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.handle_tools_list()),
            "tools/call" => self
                .handle_tools_call(&request.params)
                .await
                .map_err(|error| {
                    let code = if error.is_client_error() {
                        MCP_ERROR_INVALID_PARAMS
                    } else {
                        MCP_ERROR_INTERNAL
                    };
                    McpDispatchError::new(id, code, error.to_string())
                }),
            other => Err(McpDispatchError::new(
                id,
                MCP_ERROR_METHOD_NOT_FOUND,
                format!("unsupported method '{other}'"),
            )),
        }
    }

    fn handle_initialize(&self) -> Value {
        json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "serverInfo": {
                "name": self.info.name,
                "version": self.info.version,
            },
            "capabilities": {
                "tools": {
                    "listChanged": false
                }
            }
        })
    }

    fn handle_tools_list(&self) -> Value {
        let mut tools = self.dispatcher.tools();
        tools.sort_by(|left, right| left.name.cmp(&right.name));
        json!({ "tools": tools })
    }

    async fn handle_tools_call(&self, params: &Map<String, Value>) -> AdapterResult<Value> {
        let tool = params
            .get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                AdapterError::InvalidArgument("tools/call requires non-empty field 'name'".into())
            })?;
        let arguments = match params.get("arguments") {
            Some(Value::Object(arguments)) => arguments.clone(),
            Some(Value::Null) | None => Map::new(),
            Some(_) => {
                return Err(AdapterError::InvalidArgument(
                    "tools/call field 'arguments' must be an object".into(),
                ))
            }
        };

        let outcome = self
            .dispatcher
            .run_tool(ToolCall::new(tool, arguments))
            .await?;
        debug!(tool, is_error = outcome.is_error, "tool finished");
        Ok(mcp_tool_call_result(&outcome.text, outcome.is_error))
    }
}

fn parse_jsonrpc_request(value: &Value) -> Result<McpJsonRpcRequest, McpDispatchError> {
    let Some(object) = value.as_object() else {
        return Err(McpDispatchError::new(
            Value::Null,
            MCP_ERROR_INVALID_REQUEST,
            "jsonrpc request must be an object",
        ));
    };

    let id = match object.get("id") {
        None => None,
        Some(id @ (Value::String(_) | Value::Number(_) | Value::Null)) => Some(id.clone()),
        Some(_) => {
            return Err(McpDispatchError::new(
                Value::Null,
                MCP_ERROR_INVALID_REQUEST,
                "jsonrpc id must be a string, number or null",
            ))
        }
    };
    let reply_id = id.clone().unwrap_or(Value::Null);

    let jsonrpc = object
        .get("jsonrpc")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if jsonrpc != MCP_JSONRPC_VERSION {
        return Err(McpDispatchError::new(
            reply_id,
            MCP_ERROR_INVALID_REQUEST,
            format!("jsonrpc must be '{MCP_JSONRPC_VERSION}'"),
        ));
    }

    let method = object
        .get("method")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            McpDispatchError::new(
                reply_id.clone(),
                MCP_ERROR_INVALID_REQUEST,
                "jsonrpc request must include non-empty method",
            )
        })?;

    let params = match object.get("params") {
        Some(Value::Object(params)) => params.clone(),
        Some(Value::Null) | None => Map::new(),
        Some(_) => {
            return Err(McpDispatchError::new(
                reply_id,
                MCP_ERROR_INVALID_PARAMS,
                "jsonrpc request params must be an object",
            ))
        }
    };

    Ok(McpJsonRpcRequest {
        id,
        method: method.to_string(),
        params,
    })
}

fn mcp_tool_call_result(text: &str, is_error: bool) -> Value {
    json!({
        "content": [{
            "type": MCP_CONTENT_TYPE_TEXT,
            "text": text
        }],
        "isError": is_error,
    })
}

async fn write_jsonrpc_line<W>(writer: &mut W, value: &Value) -> AdapterResult<()>
where
    W: AsyncWrite + Unpin,
{
    let mut encoded = serde_json::to_vec(value)?;
    encoded.push(b'\n');
    writer.write_all(&encoded).await?;
    writer.flush().await?;
    Ok(())
}

fn jsonrpc_result_frame(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": MCP_JSONRPC_VERSION,
        "id": id,
        "result": result,
    })
}

fn jsonrpc_error_frame(id: Value, code: i64, message: impl Into<String>) -> Value {
    json!({
        "jsonrpc": MCP_JSONRPC_VERSION,
        "id": id,
        "error": {
            "code": code,
            "message": message.into(),
        }
    })
}
