use std::path::PathBuf;

use anyhow::{Context, Result};
use scenario_kernel::Config;
use tokio::fs;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Logs go to stderr; stdout carries command output and the MCP transport.
pub fn init_logging(level: &str, debug: bool, json: bool) -> Result<()> {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        level.parse().context("Invalid log level")?
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string()));
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    Ok(())
}

pub struct LoadedConfig {
    pub config: Config,
    /// File the configuration came from, if one existed
    pub path: Option<PathBuf>,
}

pub async fn load_config(config_path: Option<&PathBuf>) -> Result<LoadedConfig> {
    let config_path = match config_path {
        Some(path) => Some(path.clone()),
        None => {
            // Priority: ./config/config.yaml > ~/.config/scenario-forge/config.yaml
            let local_config = PathBuf::from("config/config.yaml");
            if local_config.exists() {
                Some(local_config)
            } else {
                dirs::config_dir().map(|mut path| {
                    path.push("scenario-forge");
                    path.push("config.yaml");
                    path
                })
            }
        }
    };

    let (mut config, path) = match config_path {
        Some(path) if path.exists() => {
            let content = fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let config = Config::from_yaml_str(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?;
            info!("Loaded configuration from: {}", path.display());
            (config, Some(path))
        }
        Some(path) => {
            warn!("Config file not found, using defaults: {}", path.display());
            (Config::default(), None)
        }
        None => {
            warn!("No config directory available, using defaults");
            (Config::default(), None)
        }
    };

    config.apply_env_overrides();
    config.validate().context("Invalid configuration")?;
    Ok(LoadedConfig { config, path })
}
