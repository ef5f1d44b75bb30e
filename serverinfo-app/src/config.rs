//! Configuration management
//!
//! Handles:
//! - Metrics endpoint address
//! - Polling periods and request timeout
//! - Display labels
//! - Cross-platform storage, overridable with `SERVERINFO_CONFIG`

use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serverinfo_core::{EndpointResolver, Labels};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

pub const CONFIG_ENV: &str = "SERVERINFO_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub polling: PollingConfig,
    pub labels: Labels,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    pub hardware_period_ms: u64,
    pub system_period_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_ms: Option<u64>,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            hardware_period_ms: 5000,
            system_period_ms: 1000,
            request_timeout_ms: None,
        }
    }
}

impl PollingConfig {
    pub fn hardware_period(&self) -> Duration {
        Duration::from_millis(self.hardware_period_ms)
    }

    pub fn system_period(&self) -> Duration {
        Duration::from_millis(self.system_period_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

impl AppConfig {
    /// Missing file yields defaults, unreadable or invalid file is an error
    pub async fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Write the config, creating parent directories as needed
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        tokio::fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write config {}", path.display()))?;

        info!("💾 Configuration saved to {}", path.display());
        Ok(())
    }

    /// Get config file path, honouring `SERVERINFO_CONFIG`
    pub fn config_file_path() -> Result<PathBuf> {
        resolve_config_path(std::env::var_os(CONFIG_ENV), dirs::config_dir())
    }

    pub fn has_address(&self) -> bool {
        !self.api.address.trim().is_empty()
    }
}

fn resolve_config_path(
    override_path: Option<OsString>,
    config_dir: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(path) = override_path.filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    let mut path =
        config_dir.ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
    path.push("serverinfo");
    path.push("config.toml");
    Ok(path)
}

/// Holds the configured endpoint address and persists changes to it
pub struct ApiAddressManager {
    config: RwLock<AppConfig>,
    path: PathBuf,
}

impl ApiAddressManager {
    pub fn new(config: AppConfig, path: PathBuf) -> Self {
        Self {
            config: RwLock::new(config),
            path,
        }
    }

    /// Replace the address for this run only
    pub fn override_address(&self, address: impl Into<String>) {
        self.config.write().api.address = address.into();
    }

    /// Replace the address and write the whole config back to disk
    pub async fn set_address(&self, address: impl Into<String>) -> Result<()> {
        let updated = {
            let mut config = self.config.write();
            config.api.address = address.into();
            config.clone()
        };
        updated.save_to(&self.path).await
    }

    /// Replace the whole config and persist it
    pub async fn update(&self, config: AppConfig) -> Result<()> {
        *self.config.write() = config.clone();
        config.save_to(&self.path).await
    }

    pub fn config(&self) -> AppConfig {
        self.config.read().clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EndpointResolver for ApiAddressManager {
    fn api_address(&self) -> String {
        self.config.read().api.address.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.polling.hardware_period(), Duration::from_secs(5));
        assert_eq!(config.polling.system_period(), Duration::from_secs(1));
        assert_eq!(config.polling.request_timeout(), None);
        assert!(!config.has_address());
    }

    #[test]
    fn test_config_file_path() {
        let path = resolve_config_path(None, Some(PathBuf::from("/home/u/.config"))).unwrap();
        assert_eq!(path, PathBuf::from("/home/u/.config/serverinfo/config.toml"));

        let path = resolve_config_path(
            Some(OsString::from("/tmp/custom.toml")),
            Some(PathBuf::from("/home/u/.config")),
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("/tmp/custom.toml"));

        let path = resolve_config_path(Some(OsString::new()), Some(PathBuf::from("/c"))).unwrap();
        assert_eq!(path, PathBuf::from("/c/serverinfo/config.toml"));

        assert!(resolve_config_path(None, None).is_err());
    }

    #[tokio::test]
    async fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).await.unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.api.address = "http://10.0.0.2:8080/api/metrics".to_string();
        config.polling.request_timeout_ms = Some(1500);
        config.labels.uptime = "Up:".to_string();
        config.save_to(&path).await.unwrap();

        let loaded = AppConfig::load_from(&path).await.unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.polling.request_timeout(), Some(Duration::from_millis(1500)));
    }

    #[tokio::test]
    async fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(
            &path,
            "[api]\naddress = \"http://pi.local/api\"\n\n[labels]\nkernel = \"Noyau :\"\n",
        )
        .await
        .unwrap();

        let config = AppConfig::load_from(&path).await.unwrap();
        assert_eq!(config.api.address, "http://pi.local/api");
        assert_eq!(config.polling, PollingConfig::default());
        assert_eq!(config.labels.kernel, "Noyau :");
        assert_eq!(config.labels.uptime, "Uptime:");
    }

    #[tokio::test]
    async fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "[polling]\nhardware_period_ms = \"fast\"\n")
            .await
            .unwrap();

        let err = AppConfig::load_from(&path).await.unwrap_err();
        assert!(err.to_string().contains("Invalid config"));
    }

    #[tokio::test]
    async fn test_address_manager_persists_address() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let manager = ApiAddressManager::new(AppConfig::default(), path.clone());
        assert_eq!(manager.api_address(), "");

        manager.set_address("http://192.168.1.20:5000/").await.unwrap();
        assert_eq!(manager.api_address(), "http://192.168.1.20:5000/");

        let reloaded = AppConfig::load_from(&path).await.unwrap();
        assert_eq!(reloaded.api.address, "http://192.168.1.20:5000/");
    }

    #[tokio::test]
    async fn test_override_is_not_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let manager = ApiAddressManager::new(AppConfig::default(), path.clone());

        manager.override_address("http://localhost:9000/");
        assert_eq!(manager.api_address(), "http://localhost:9000/");
        assert!(!path.exists());
    }
}
