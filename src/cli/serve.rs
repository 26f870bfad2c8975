use anyhow::Result;
use clap::Args;
use l7_adapter::{McpServer, ServerInfo};
use tracing::info;

use crate::cli::context::CliContext;

#[derive(Args, Clone, Debug)]
pub struct ServeArgs {
    /// Server name reported during MCP initialization
    #[arg(long, default_value = "scenario-forge")]
    pub server_name: String,
}

pub async fn cmd_serve(args: ServeArgs, ctx: &CliContext) -> Result<()> {
    let tools = ctx.tools().await?;
    let server = McpServer::new(
        tools,
        ServerInfo {
            name: args.server_name,
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    );

    info!("MCP server listening on stdio");
    let report = server.serve_stdio().await?;
    info!(
        processed_frames = report.processed_frames,
        error_count = report.error_count,
        "MCP server stopped"
    );
    Ok(())
}
