//! Scenario kernel: configuration, artifact storage, runner invocation and
//! the tool service served over MCP.

pub mod app_settings;
pub mod errors;
pub mod runner;
pub mod storage;
pub mod tools;

pub use app_settings::Config;
pub use errors::{KernelError, KernelResult};
pub use runner::{summarize_run, CypressRunner, RunStatus, RunnerReport, TestRunner};
pub use storage::{test_file_name, ArtifactStore, FsArtifactStore};
pub use tools::{GeneratedTest, ToolService};
