use anyhow::Result;
use clap::Args;
use scenario_compiler::ScenarioCompiler;
use scenario_kernel::test_file_name;
use serde::Serialize;
use tracing::info;

use crate::cli::context::CliContext;
use crate::cli::output::{print_output, OutputFormat};

#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// Natural language description of the scenario
    pub description: String,

    /// Name for the test file
    #[arg(short, long)]
    pub name: String,

    /// Print the file that would be written without touching disk
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Serialize)]
struct GenerateOutput {
    file_path: String,
    test_content: String,
    written: bool,
}

pub async fn cmd_generate(args: GenerateArgs, ctx: &CliContext, format: OutputFormat) -> Result<()> {
    let output = if args.dry_run {
        let file_path = ctx.config().spec_root().join(test_file_name(&args.name)?);
        let compiler = ScenarioCompiler::new(ctx.config().emitter()?);
        let compiled = compiler.compile(&args.description)?;
        GenerateOutput {
            file_path: file_path.display().to_string(),
            test_content: compiled.source,
            written: false,
        }
    } else {
        let generated = ctx
            .tools()
            .await?
            .generate_test(&args.description, &args.name)
            .await?;
        info!(path = %generated.file_path.display(), "test file written");
        GenerateOutput {
            file_path: generated.file_path.display().to_string(),
            test_content: generated.test_content,
            written: true,
        }
    };

    print_output(&format, &output, || {
        let verb = if output.written { "Saved" } else { "Would save" };
        format!("{verb} {}\n\n{}", output.file_path, output.test_content)
    })
}
