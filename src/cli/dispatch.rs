use super::compile::cmd_compile;
use super::env::CliArgs;
use super::execute::cmd_execute;
use super::generate::cmd_generate;
use super::info::cmd_info;
use super::serve::cmd_serve;
use crate::cli::commands::Commands;
use crate::cli::context::CliContext;
use anyhow::Result;

pub async fn dispatch(cli: &CliArgs, ctx: &CliContext) -> Result<()> {
    match cli.command.clone() {
        Commands::Serve(args) => cmd_serve(args, ctx).await,
        Commands::Compile(args) => cmd_compile(args, ctx, cli.output.clone()),
        Commands::Generate(args) => cmd_generate(args, ctx, cli.output.clone()).await,
        Commands::Execute(args) => cmd_execute(args, ctx, cli.output.clone()).await,
        Commands::Info => cmd_info(ctx),
    }
}
