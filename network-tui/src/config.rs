use anyhow::{Context, Result};
use network_types::ColorScheme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Client configuration stored in `~/.network/config.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub server_url: Option<String>,
    /// Username the session cookie belongs to
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub csrf_token: Option<String>,
    #[serde(default)]
    pub color_scheme: ColorScheme,
    #[serde(default)]
    pub last_updated: Option<chrono::DateTime<chrono::Utc>>,
}

/// Configuration manager for the .network directory
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Create a config manager rooted at `~/.network`, creating the directory if needed
    pub fn new() -> Result<Self> {
        let home_dir = dirs::home_dir().context("Could not determine home directory")?;
        Self::with_dir(home_dir.join(".network"))
    }

    /// Create a config manager rooted at an explicit directory
    pub fn with_dir(config_dir: impl Into<PathBuf>) -> Result<Self> {
        let config_dir = config_dir.into();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).context("Failed to create .network directory")?;
        }

        Ok(Self { config_dir })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }

    /// Load client configuration, `None` when nothing has been saved yet
    pub fn load(&self) -> Result<Option<ClientConfig>> {
        let config_file = self.config_file();

        if !config_file.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&config_file).context("Failed to read config file")?;

        let config: ClientConfig = serde_json::from_str(&json).context("Failed to parse config file")?;

        Ok(Some(config))
    }

    /// Save client configuration, stamping `last_updated`
    pub fn save(&self, config: &ClientConfig) -> Result<()> {
        let mut config = config.clone();
        config.last_updated = Some(chrono::Utc::now());

        let json = serde_json::to_string_pretty(&config).context("Failed to serialize config")?;

        fs::write(self.config_file(), json).context("Failed to write config file")?;

        log::info!("Saved client configuration to {}", self.config_file().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_returns_none_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_dir(dir.path()).unwrap();
        assert!(manager.load().unwrap().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_dir(dir.path().join("nested")).unwrap();

        let config = ClientConfig {
            server_url: Some("http://localhost:8000".to_string()),
            username: Some("alice".to_string()),
            session_id: Some("s3ss10n".to_string()),
            csrf_token: None,
            color_scheme: ColorScheme::Dark,
            last_updated: None,
        };
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap().unwrap();
        assert_eq!(loaded.server_url, config.server_url);
        assert_eq!(loaded.username.as_deref(), Some("alice"));
        assert_eq!(loaded.color_scheme, ColorScheme::Dark);
        assert!(loaded.last_updated.is_some());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.json"), r#"{"username": "bob"}"#).unwrap();

        let manager = ConfigManager::with_dir(dir.path()).unwrap();
        let loaded = manager.load().unwrap().unwrap();
        assert_eq!(loaded.username.as_deref(), Some("bob"));
        assert_eq!(loaded.color_scheme, ColorScheme::Default);
        assert!(loaded.server_url.is_none());
    }

    #[test]
    fn test_corrupt_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.json"), "not json").unwrap();

        let manager = ConfigManager::with_dir(dir.path()).unwrap();
        assert!(manager.load().is_err());
    }
}
