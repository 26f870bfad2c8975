use anyhow::Result;
use clap::Args;
use scenario_compiler::ScenarioCompiler;
use scenario_core_types::Action;
use serde::Serialize;

use crate::cli::context::CliContext;
use crate::cli::output::{print_output, OutputFormat};

#[derive(Args, Clone, Debug)]
pub struct CompileArgs {
    /// Natural language description of the scenario
    pub description: String,

    /// Also print the generated Cypress source
    #[arg(long)]
    pub source: bool,
}

#[derive(Serialize)]
struct CompileOutput<'a> {
    test_name: &'a str,
    actions: &'a [Action],
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
}

pub fn cmd_compile(args: CompileArgs, ctx: &CliContext, format: OutputFormat) -> Result<()> {
    let compiler = ScenarioCompiler::new(ctx.config().emitter()?);
    let compiled = compiler.compile(&args.description)?;

    let output = CompileOutput {
        test_name: &compiled.scenario.display_name,
        actions: &compiled.actions,
        source: args.source.then_some(compiled.source.as_str()),
    };

    print_output(&format, &output, || {
        let mut lines = vec![format!("Scenario: {}", compiled.scenario.display_name)];
        for (index, action) in compiled.actions.iter().enumerate() {
            lines.push(format!("  {}. {}", index + 1, action));
        }
        if args.source {
            lines.push(String::new());
            lines.push(compiled.source.clone());
        }
        lines.join("\n")
    })
}
