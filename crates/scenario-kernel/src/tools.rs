//! Tool implementations behind the MCP host

use std::path::PathBuf;
use std::sync::Arc;

use action_flow::EngineCommand;
use async_trait::async_trait;
use l7_adapter::{AdapterError, AdapterResult, DispatcherPort, ToolCall, ToolDescriptor, ToolOutcome};
use scenario_compiler::{render_recording_skeleton, ScenarioCompiler};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::app_settings::Config;
use crate::errors::{KernelError, KernelResult};
use crate::runner::{summarize_run, CypressRunner, TestRunner};
use crate::storage::{test_file_name, ArtifactStore, FsArtifactStore};

pub const TOOL_GENERATE_TEST: &str = "generate-test";
pub const TOOL_EXECUTE_TEST: &str = "execute-test";
pub const TOOL_RECORD_TEST: &str = "record-test";

/// Result of the generate-test tool.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedTest {
    pub file_path: PathBuf,
    pub test_content: String,
}

impl GeneratedTest {
    pub fn summary(&self) -> String {
        format!(
            "Test generated and saved to: {}\n\nTest content:\n{}",
            self.file_path.display(),
            self.test_content
        )
    }
}

pub struct ToolService {
    compiler: ScenarioCompiler,
    store: Arc<dyn ArtifactStore>,
    runner: Arc<dyn TestRunner>,
}

impl ToolService {
    pub fn new(
        compiler: ScenarioCompiler,
        store: Arc<dyn ArtifactStore>,
        runner: Arc<dyn TestRunner>,
    ) -> Self {
        Self {
            compiler,
            store,
            runner,
        }
    }

    /// Filesystem store and Cypress runner rooted at the configured project.
    pub fn from_config(config: &Config) -> KernelResult<Self> {
        config.validate()?;
        Ok(Self::new(
            ScenarioCompiler::new(config.emitter()?),
            Arc::new(FsArtifactStore::new(config.spec_root())),
            Arc::new(CypressRunner::new(
                config.runner.clone(),
                config.project_dir.clone(),
            )),
        ))
    }

    /// Compile `description` and persist it as `<test_name>.cy.ts`.
    #[instrument(skip(self, description))]
    pub async fn generate_test(
        &self,
        description: &str,
        test_name: &str,
    ) -> KernelResult<GeneratedTest> {
        let file_name = test_file_name(test_name)?;
        let compiled = self.compiler.compile(description)?;
        debug!(steps = compiled.actions.len(), "compiled description");

        let file_path = self.store.save(&file_name, &compiled.source).await?;
        Ok(GeneratedTest {
            file_path,
            test_content: compiled.source,
        })
    }

    /// Run `spec` and describe the outcome; never fails.
    #[instrument(skip(self))]
    pub async fn execute_test(&self, spec: &str, command: &str) -> String {
        if !command.trim().is_empty() {
            if let Err(err) = command.parse::<EngineCommand>() {
                warn!(%err, "rejecting command before launching runner");
                return format!("Error executing Cypress command: {err}");
            }
        }
        let result = self.runner.run(spec, command).await;
        summarize_run(&result)
    }

    /// Recording has no backend yet; the skeleton is only logged.
    pub fn record_test(&self, test_name: &str) -> String {
        let skeleton = render_recording_skeleton(test_name);
        debug!(test_name, %skeleton, "recording skeleton");
        format!("Test file created: {test_name}")
    }

    pub fn descriptors() -> Vec<ToolDescriptor> {
        vec![
            ToolDescriptor::with_string_args(
                TOOL_GENERATE_TEST,
                "Generate a Cypress test from a natural language description",
                &[
                    ("description", "Natural language description of the test scenario"),
                    ("testName", "Name for the test file"),
                ],
            ),
            ToolDescriptor::with_string_args(
                TOOL_EXECUTE_TEST,
                "Execute a Cypress test file with specific commands",
                &[
                    ("spec", "Path to the Cypress test spec file"),
                    ("command", "Cypress command to execute"),
                ],
            ),
            ToolDescriptor::with_string_args(
                TOOL_RECORD_TEST,
                "Start recording user interactions for test generation",
                &[("testName", "Name of the test to be generated")],
            ),
        ]
    }
}

#[async_trait]
impl DispatcherPort for ToolService {
    fn tools(&self) -> Vec<ToolDescriptor> {
        Self::descriptors()
    }

    async fn run_tool(&self, call: ToolCall) -> AdapterResult<ToolOutcome> {
        info!(tool = %call.tool, "running tool");
        match call.tool.as_str() {
            TOOL_GENERATE_TEST => {
                let description = call.required_str("description")?;
                let test_name = call.required_str("testName")?;
                Ok(match self.generate_test(description, test_name).await {
                    Ok(generated) => ToolOutcome::text(generated.summary()),
                    Err(err) => ToolOutcome::error(generation_error(&err)),
                })
            }
            TOOL_EXECUTE_TEST => {
                let spec = call.required_str("spec")?;
                let command = call.required_str("command")?;
                let text = self.execute_test(spec, command).await;
                let is_error = text.starts_with("Error executing");
                Ok(ToolOutcome { text, is_error })
            }
            TOOL_RECORD_TEST => {
                let test_name = call.required_str("testName")?;
                Ok(ToolOutcome::text(self.record_test(test_name)))
            }
            other => Err(AdapterError::UnknownTool(other.to_string())),
        }
    }
}

fn generation_error(err: &KernelError) -> String {
    format!("Error generating test: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::RunnerReport;
    use serde_json::{json, Map, Value};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingRunner {
        calls: Mutex<Vec<(String, String)>>,
        exit_code: Option<i32>,
    }

    #[async_trait]
    impl TestRunner for RecordingRunner {
        async fn run(&self, spec: &str, command: &str) -> KernelResult<RunnerReport> {
            self.calls
                .lock()
                .unwrap()
                .push((spec.to_string(), command.to_string()));
            Ok(RunnerReport::from_exit_code(self.exit_code))
        }
    }

    fn service(dir: &std::path::Path, runner: Arc<RecordingRunner>) -> ToolService {
        ToolService::new(
            ScenarioCompiler::default(),
            Arc::new(FsArtifactStore::new(dir)),
            runner,
        )
    }

    fn call(tool: &str, arguments: Value) -> ToolCall {
        let arguments: Map<String, Value> = serde_json::from_value(arguments).unwrap();
        ToolCall::new(tool, arguments)
    }

    #[tokio::test]
    async fn generate_test_persists_and_reports() {
        let temp = tempfile::tempdir().unwrap();
        let tools = service(temp.path(), Arc::new(RecordingRunner::default()));

        let outcome = tools
            .run_tool(call(
                TOOL_GENERATE_TEST,
                json!({"description": "Visit 'https://a.test' and click 'Submit'", "testName": "Submit Flow"}),
            ))
            .await
            .unwrap();

        let path = temp.path().join("submit-flow.cy.ts");
        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(!outcome.is_error);
        assert_eq!(
            outcome.text,
            format!("Test generated and saved to: {}\n\nTest content:\n{}", path.display(), saved)
        );
        assert!(saved.contains("cy.visit('https://a.test');"));
    }

    #[tokio::test]
    async fn generate_test_errors_are_in_band() {
        let temp = tempfile::tempdir().unwrap();
        let tools = service(temp.path(), Arc::new(RecordingRunner::default()));

        let outcome = tools
            .run_tool(call(
                TOOL_GENERATE_TEST,
                json!({"description": "wait 1 second", "testName": "!!!"}),
            ))
            .await
            .unwrap();
        assert!(outcome.is_error);
        assert!(outcome.text.starts_with("Error generating test: "));
    }

    #[tokio::test]
    async fn execute_test_forwards_spec_and_command() {
        let runner = Arc::new(RecordingRunner {
            exit_code: Some(1),
            ..RecordingRunner::default()
        });
        let temp = tempfile::tempdir().unwrap();
        let tools = service(temp.path(), runner.clone());

        let outcome = tools
            .run_tool(call(
                TOOL_EXECUTE_TEST,
                json!({"spec": "cypress/e2e/login.cy.ts", "command": "visit https://a.test"}),
            ))
            .await
            .unwrap();
        assert_eq!(outcome.text, "Test execution failed");
        assert!(!outcome.is_error);
        assert_eq!(
            runner.calls.lock().unwrap().as_slice(),
            &[("cypress/e2e/login.cy.ts".to_string(), "visit https://a.test".to_string())]
        );
    }

    #[tokio::test]
    async fn unknown_command_is_rejected_without_running() {
        let runner = Arc::new(RecordingRunner::default());
        let temp = tempfile::tempdir().unwrap();
        let tools = service(temp.path(), runner.clone());

        let text = tools.execute_test("spec.cy.ts", "hover #menu").await;
        assert_eq!(text, "Error executing Cypress command: Unknown command: hover");
        assert!(runner.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn record_test_and_argument_validation() {
        let temp = tempfile::tempdir().unwrap();
        let tools = service(temp.path(), Arc::new(RecordingRunner::default()));

        let outcome = tools
            .run_tool(call(TOOL_RECORD_TEST, json!({"testName": "Checkout"})))
            .await
            .unwrap();
        assert_eq!(outcome.text, "Test file created: Checkout");
        assert!(std::fs::read_dir(temp.path()).unwrap().next().is_none());

        let err = tools
            .run_tool(call(TOOL_EXECUTE_TEST, json!({"spec": "a.cy.ts"})))
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::InvalidArgument(_)));

        let err = tools.run_tool(call("nope", json!({}))).await.unwrap_err();
        assert!(matches!(err, AdapterError::UnknownTool(_)));
    }

    #[test]
    fn descriptors_cover_every_tool() {
        let names: Vec<_> = ToolService::descriptors()
            .into_iter()
            .map(|tool| tool.name)
            .collect();
        assert_eq!(names, [TOOL_GENERATE_TEST, TOOL_EXECUTE_TEST, TOOL_RECORD_TEST]);
    }
}
