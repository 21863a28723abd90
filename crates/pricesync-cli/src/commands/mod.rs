//! CLI command implementations.

pub mod config;
pub mod parse;
pub mod update;

use std::path::{Path, PathBuf};

use pricesync_core::models::config::PricesyncConfig;
use tracing::debug;

/// Location of the user configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pricesync")
        .join("config.json")
}

/// Resolve the config file: an explicit `-c` path, else the user file.
pub fn config_file(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load configuration for a pipeline command.
///
/// An explicit path must exist; the user file is optional.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PricesyncConfig> {
    if let Some(path) = config_path {
        return read_config(Path::new(path));
    }

    let path = default_config_path();
    if path.exists() {
        read_config(&path)
    } else {
        debug!("No config file at {}, using defaults", path.display());
        Ok(PricesyncConfig::default())
    }
}

fn read_config(path: &Path) -> anyhow::Result<PricesyncConfig> {
    debug!("Loading config from {}", path.display());
    PricesyncConfig::from_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))
}
