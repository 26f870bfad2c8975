use clap::Subcommand;

use super::compile::CompileArgs;
use super::execute::ExecuteArgs;
use super::generate::GenerateArgs;
use super::serve::ServeArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Serve the test tools to MCP clients over stdio
    Serve(ServeArgs),

    /// Compile a description and print the resulting steps
    Compile(CompileArgs),

    /// Generate a Cypress spec file from a description
    Generate(GenerateArgs),

    /// Run a Cypress spec through the configured runner
    Execute(ExecuteArgs),

    /// Show version, build and configuration information
    Info,
}
