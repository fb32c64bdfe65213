pub mod model;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub use model::{AppConfig, LoggingConfig};

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "MONGOMART_API_URL";

fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mongomart")
        .join("config.toml")
}

pub fn load_config() -> Result<AppConfig> {
    let mut config = load_config_from(&config_path())?;
    if let Ok(url) = std::env::var(API_URL_ENV) {
        apply_api_url(&mut config, &url);
    }
    Ok(config)
}

/// Read a config file, falling back to defaults when it does not exist.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}

fn apply_api_url(config: &mut AppConfig, url: &str) {
    let url = url.trim();
    if !url.is_empty() {
        config.api.base_url = url.trim_end_matches('/').to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = load_config_from(Path::new("/nonexistent/mongomart.toml")).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.ui.notice_duration_ms, 3000);
        assert_eq!(config.ui.grid_columns, 3);
        assert!(config.logging.enabled);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            concat!(
                "[api]\nbase_url = \"https://shop.example.com\"\n\n",
                "[storage]\ndownload_dir = \"/tmp/imgs\"\n",
            ),
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.api.base_url, "https://shop.example.com");
        assert_eq!(config.storage.download_dir, PathBuf::from("/tmp/imgs"));
        assert_eq!(config.ui.tick_rate_ms, 50);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui]\nnotice_duration_ms = \"soon\"\n").unwrap();
        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn test_api_url_override() {
        let mut config = AppConfig::default();
        apply_api_url(&mut config, " http://api.local:9000/ ");
        assert_eq!(config.api.base_url, "http://api.local:9000");

        apply_api_url(&mut config, "  ");
        assert_eq!(config.api.base_url, "http://api.local:9000");
    }
}
