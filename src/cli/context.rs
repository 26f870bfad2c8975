use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::OnceCell;

use scenario_kernel::{Config, ToolService};

pub struct CliContext {
    config: Arc<Config>,
    config_path: Option<PathBuf>,
    tools: OnceCell<Arc<ToolService>>,
}

impl CliContext {
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Self {
        Self {
            config: Arc::new(config),
            config_path,
            tools: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &Config {
        self.config.as_ref()
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub async fn tools(&self) -> Result<Arc<ToolService>> {
        self.tools
            .get_or_try_init(|| async {
                ToolService::from_config(&self.config)
                    .map(Arc::new)
                    .map_err(anyhow::Error::from)
            })
            .await
            .cloned()
    }
}
