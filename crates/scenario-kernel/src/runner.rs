//! External test runner invocation

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Serialize;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::app_settings::RunnerConfig;
use crate::errors::{KernelError, KernelResult};

pub const RUNNER_CONFIG_ARG: &str = "video=false,screenshotOnRunFailure=true";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Passed,
    Failed,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunnerReport {
    pub status: RunStatus,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl RunnerReport {
    pub fn from_exit_code(exit_code: Option<i32>) -> Self {
        let status = match exit_code {
            Some(0) => RunStatus::Passed,
            Some(_) => RunStatus::Failed,
            None => RunStatus::Unknown,
        };
        Self {
            status,
            exit_code,
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}

#[async_trait]
pub trait TestRunner: Send + Sync {
    /// Run one spec with `command` forwarded to it.
    async fn run(&self, spec: &str, command: &str) -> KernelResult<RunnerReport>;
}

/// Runs the Cypress CLI inside the project directory.
#[derive(Debug, Clone)]
pub struct CypressRunner {
    runner: RunnerConfig,
    project_dir: PathBuf,
}

impl CypressRunner {
    pub fn new(runner: RunnerConfig, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            project_dir: project_dir.into(),
        }
    }

    /// Full argument list passed to the runner program
    pub fn arguments(&self, spec: &str, command: &str) -> Vec<String> {
        let mut args = self.runner.args.clone();
        args.extend([
            "--spec".to_string(),
            spec.to_string(),
            "--config".to_string(),
            RUNNER_CONFIG_ARG.to_string(),
            "--env".to_string(),
            format!("command={command}"),
        ]);
        args
    }
}

#[async_trait]
impl TestRunner for CypressRunner {
    async fn run(&self, spec: &str, command: &str) -> KernelResult<RunnerReport> {
        let args = self.arguments(spec, command);
        info!(
            program = %self.runner.command,
            spec,
            project_dir = %self.project_dir.display(),
            "launching test runner"
        );
        debug!(?args, "runner arguments");

        let output = Command::new(&self.runner.command)
            .args(&args)
            .current_dir(&self.project_dir)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| KernelError::Spawn {
                program: self.runner.command.clone(),
                source,
            })?;

        let mut report = RunnerReport::from_exit_code(output.status.code());
        report.stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        report.stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        match report.status {
            RunStatus::Passed => info!(spec, "runner finished successfully"),
            RunStatus::Failed => warn!(spec, exit_code = ?report.exit_code, "runner reported failures"),
            RunStatus::Unknown => warn!(spec, "runner terminated without an exit code"),
        }
        Ok(report)
    }
}

/// Status line returned by the execute-test tool.
pub fn summarize_run(result: &KernelResult<RunnerReport>) -> String {
    match result {
        Ok(report) => match report.status {
            RunStatus::Failed => "Test execution failed".to_string(),
            RunStatus::Passed => "Test executed successfully".to_string(),
            RunStatus::Unknown => "Test completed with unknown status".to_string(),
        },
        Err(err) => format!("Error executing Cypress command: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_map_to_status() {
        assert_eq!(RunnerReport::from_exit_code(Some(0)).status, RunStatus::Passed);
        assert_eq!(RunnerReport::from_exit_code(Some(3)).status, RunStatus::Failed);
        assert_eq!(RunnerReport::from_exit_code(None).status, RunStatus::Unknown);
    }

    #[test]
    fn summaries_match_status() {
        assert_eq!(
            summarize_run(&Ok(RunnerReport::from_exit_code(Some(0)))),
            "Test executed successfully"
        );
        assert_eq!(
            summarize_run(&Ok(RunnerReport::from_exit_code(Some(1)))),
            "Test execution failed"
        );
        assert_eq!(
            summarize_run(&Ok(RunnerReport::from_exit_code(None))),
            "Test completed with unknown status"
        );
        let err = KernelError::Config("boom".into());
        assert_eq!(
            summarize_run(&Err(err)),
            "Error executing Cypress command: invalid configuration: boom"
        );
    }

    #[test]
    fn arguments_forward_spec_config_and_command() {
        let runner = CypressRunner::new(RunnerConfig::default(), ".");
        assert_eq!(
            runner.arguments("cypress/e2e/login.cy.ts", "visit https://a.test"),
            vec![
                "cypress",
                "run",
                "--spec",
                "cypress/e2e/login.cy.ts",
                "--config",
                RUNNER_CONFIG_ARG,
                "--env",
                "command=visit https://a.test",
            ]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn runs_configured_program() {
        let temp = tempfile::tempdir().unwrap();
        let passing = CypressRunner::new(
            RunnerConfig {
                command: "true".into(),
                args: vec![],
            },
            temp.path(),
        );
        let report = passing.run("spec.cy.ts", "").await.unwrap();
        assert_eq!(report.status, RunStatus::Passed);

        let failing = CypressRunner::new(
            RunnerConfig {
                command: "false".into(),
                args: vec![],
            },
            temp.path(),
        );
        assert_eq!(
            failing.run("spec.cy.ts", "").await.unwrap().status,
            RunStatus::Failed
        );
    }

    #[tokio::test]
    async fn missing_program_is_spawn_error() {
        let runner = CypressRunner::new(
            RunnerConfig {
                command: "scenario-forge-no-such-runner".into(),
                args: vec![],
            },
            ".",
        );
        let result = runner.run("spec.cy.ts", "").await;
        assert!(matches!(result, Err(KernelError::Spawn { .. })));
        assert!(summarize_run(&result).starts_with("Error executing Cypress command: failed to launch"));
    }
}
