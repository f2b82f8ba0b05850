//! Config file lookup and loading.

use crate::schema::PaddockConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the Paddock config directory.
/// Priority: `PADDOCK_CONFIG_DIR` env > `~/.paddock/`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PADDOCK_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    match dirs::home_dir() {
        Some(home) => home.join(".paddock"),
        None => PathBuf::from(".paddock"),
    }
}

/// Resolve the full path to the main config file inside `config_dir`.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// The config file to load: `PADDOCK_CONFIG` when set, otherwise
/// `config.yaml` in [`config_dir`].
pub fn default_config_path() -> PathBuf {
    match std::env::var("PADDOCK_CONFIG") {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => config_file_path(&config_dir()),
    }
}

/// Load and parse the config from disk.
///
/// Returns `Ok(Default::default())` if the file doesn't exist (first run).
pub async fn load_config(path: &Path) -> Result<PaddockConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(PaddockConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    if raw.trim().is_empty() {
        return Ok(PaddockConfig::default());
    }

    let config: PaddockConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("nope.yaml")).await.unwrap();
        assert!(cfg.server.is_none());
    }

    #[tokio::test]
    async fn empty_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path());
        std::fs::write(&path, "\n").unwrap();
        assert!(load_config(&path).await.unwrap().llm.is_none());
    }

    #[tokio::test]
    async fn reads_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path());
        std::fs::write(&path, "agent:\n  team: ferrari\n  circuit: monza\n").unwrap();
        let agent = load_config(&path).await.unwrap().agent.unwrap();
        assert_eq!(agent.team.as_deref(), Some("ferrari"));
        assert_eq!(agent.circuit.as_deref(), Some("monza"));
    }

    #[tokio::test]
    async fn malformed_yaml_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path());
        std::fs::write(&path, "server: [unclosed").unwrap();
        let err = format!("{:#}", load_config(&path).await.unwrap_err());
        assert!(err.contains("config.yaml"));
    }

    #[test]
    fn file_name_is_config_yaml() {
        assert_eq!(
            config_file_path(Path::new("/tmp/x")),
            PathBuf::from("/tmp/x/config.yaml")
        );
    }
}
