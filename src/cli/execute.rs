use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::context::CliContext;
use crate::cli::output::{print_output, OutputFormat};

#[derive(Args, Clone, Debug)]
pub struct ExecuteArgs {
    /// Path to the Cypress spec file
    pub spec: String,

    /// Command forwarded to the spec (e.g. "click #submit")
    #[arg(long, default_value = "")]
    pub command: String,
}

#[derive(Serialize)]
struct ExecuteOutput<'a> {
    spec: &'a str,
    command: &'a str,
    summary: String,
}

pub async fn cmd_execute(args: ExecuteArgs, ctx: &CliContext, format: OutputFormat) -> Result<()> {
    let summary = ctx
        .tools()
        .await?
        .execute_test(&args.spec, &args.command)
        .await;

    let output = ExecuteOutput {
        spec: &args.spec,
        command: &args.command,
        summary,
    };
    print_output(&format, &output, || output.summary.clone())
}
