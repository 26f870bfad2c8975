use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use scenario_compiler::{TestEmitter, DEFAULT_SUITE_TITLE};
use tracing::info;

use crate::errors::{KernelError, KernelResult};

pub const ENV_PROJECT_DIR: &str = "SCENARIO_FORGE_PROJECT_DIR";
pub const ENV_RUNNER: &str = "SCENARIO_FORGE_RUNNER";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Cypress project root; runner commands execute here
    pub project_dir: PathBuf,
    /// Where generated specs are written, relative to `project_dir`
    pub spec_dir: PathBuf,
    pub suite_title: String,
    pub viewport: ViewportConfig,
    pub runner: RunnerConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            spec_dir: PathBuf::from("cypress/e2e"),
            suite_title: DEFAULT_SUITE_TITLE.to_string(),
            viewport: ViewportConfig {
                width: 1280,
                height: 720,
            },
            runner: RunnerConfig::default(),
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            command: "npx".to_string(),
            args: vec!["cypress".to_string(), "run".to_string()],
        }
    }
}

impl RunnerConfig {
    /// Parse a whitespace-separated command line such as `npx cypress run`.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let command = parts.next()?;
        Some(Self {
            command,
            args: parts.collect(),
        })
    }
}

impl Config {
    pub fn from_yaml_str(content: &str) -> KernelResult<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> KernelResult<()> {
        if self.runner.command.trim().is_empty() {
            return Err(KernelError::Config("runner.command must not be empty".into()));
        }
        if self.spec_dir.is_absolute() {
            return Err(KernelError::Config(format!(
                "spec_dir must be relative to project_dir, got {}",
                self.spec_dir.display()
            )));
        }
        self.emitter().map(|_| ())
    }

    /// Apply `SCENARIO_FORGE_*` environment variables on top of the file values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(dir) = env::var(ENV_PROJECT_DIR) {
            if !dir.trim().is_empty() {
                info!("Using project directory from {}: {}", ENV_PROJECT_DIR, dir);
                self.project_dir = PathBuf::from(dir);
            }
        }
        if let Ok(line) = env::var(ENV_RUNNER) {
            if let Some(runner) = RunnerConfig::from_command_line(&line) {
                info!("Using runner from {}: {}", ENV_RUNNER, line);
                self.runner = runner;
            }
        }
    }

    pub fn spec_root(&self) -> PathBuf {
        self.project_dir.join(&self.spec_dir)
    }

    pub fn emitter(&self) -> KernelResult<TestEmitter> {
        Ok(TestEmitter::new(
            self.suite_title.clone(),
            (self.viewport.width, self.viewport.height),
        )?)
    }
}
