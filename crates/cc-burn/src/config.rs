use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "~/.config/cc-burn/config.json";
pub const DEFAULT_DATA_DIR: &str = "~/.claude/projects";

#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BurnConfig {
    pub hours: Option<f64>,
    pub data_dir: Option<String>,
}

pub fn get_config_path() -> PathBuf {
    PathBuf::from(shellexpand::tilde(DEFAULT_CONFIG_PATH).as_ref())
}

pub fn load_config() -> Result<BurnConfig> {
    load_config_from(get_config_path())
}

pub fn load_config_from<P: AsRef<Path>>(config_path: P) -> Result<BurnConfig> {
    let config_path = config_path.as_ref();

    if !config_path.exists() {
        return Ok(BurnConfig::default());
    }

    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
    let config: BurnConfig = serde_json::from_str(&content)
        .with_context(|| format!("Invalid config: {}", config_path.display()))?;
    log::debug!("Loaded config from {}: {:?}", config_path.display(), config);
    Ok(config)
}

/// `--data-dir`, then the config file, then `~/.claude/projects`.
pub fn resolve_data_path(cli_data_dir: Option<&str>, config: &BurnConfig) -> PathBuf {
    let raw = cli_data_dir
        .or(config.data_dir.as_deref())
        .unwrap_or(DEFAULT_DATA_DIR);
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_default() {
        let dir = TempDir::new().unwrap();
        let config = load_config_from(dir.path().join("config.json")).unwrap();
        assert_eq!(config, BurnConfig::default());
    }

    #[test]
    fn test_load_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"hours": 24, "dataDir": "/tmp/logs"}"#).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.hours, Some(24.0));
        assert_eq!(config.data_dir.as_deref(), Some("/tmp/logs"));
    }

    #[test]
    fn test_invalid_config_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();

        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn test_data_path_precedence() {
        let config = BurnConfig {
            hours: None,
            data_dir: Some("/from/config".to_string()),
        };

        assert_eq!(
            resolve_data_path(Some("/from/cli"), &config),
            PathBuf::from("/from/cli")
        );
        assert_eq!(
            resolve_data_path(None, &config),
            PathBuf::from("/from/config")
        );
        assert!(resolve_data_path(None, &BurnConfig::default()).ends_with(".claude/projects"));
    }
}
