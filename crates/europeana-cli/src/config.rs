//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use europeana_sdk::{
    ClientConfig, SdkError, DEFAULT_ENTITY_URL, DEFAULT_SEARCH_URL, DEFAULT_TIMEOUT_SECS,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available profiles
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// API profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// API key (`wskey`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Entity API base URL
    #[serde(default = "default_entity_url")]
    pub entity_url: String,

    /// Search API base URL
    #[serde(default = "default_search_url")]
    pub search_url: String,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum characters per table cell
    #[serde(default = "default_max_cell_width")]
    pub max_cell_width: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (identifiers only) format
    Quiet,
}

impl Config {
    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".europeana").join("config.toml"))
    }

    /// Load configuration from `path`, defaulting when the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration for read-only use, falling back to defaults when
    /// the file cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            warn!("Ignoring unreadable config {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.profiles
            .get(&self.active_profile)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", self.active_profile)))
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }

    /// Client configuration for the active profile.
    ///
    /// `api_key` (flag or environment) takes precedence over the profile key.
    pub fn client_config(&self, api_key: Option<String>) -> Result<ClientConfig> {
        let profile = self.get_active_profile()?;
        let key = api_key
            .or_else(|| profile.api_key.clone())
            .filter(|key| !key.trim().is_empty())
            .ok_or(SdkError::MissingApiKey)?;

        Ok(ClientConfig::new(key)
            .with_entity_url(profile.entity_url.clone())
            .with_search_url(profile.search_url.clone())
            .with_timeout(Duration::from_secs(self.settings.timeout_secs)))
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert("default".to_string(), Profile::default());

        Self {
            active_profile: "default".to_string(),
            profiles,
            settings: Settings::default(),
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            api_key: None,
            entity_url: default_entity_url(),
            search_url: default_search_url(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_cell_width: default_max_cell_width(),
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_entity_url() -> String {
    DEFAULT_ENTITY_URL.to_string()
}

fn default_search_url() -> String {
    DEFAULT_SEARCH_URL.to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_cell_width() -> usize {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.active_profile, "default");
        assert!(config.profiles.contains_key("default"));
        assert!(config.settings.color);
        assert_eq!(config.settings.max_cell_width, 60);
    }

    #[test]
    fn test_profile_management() {
        let mut config = Config::default();

        let profile = Profile {
            api_key: Some("secret".to_string()),
            ..Profile::default()
        };

        config.set_profile("research".to_string(), profile);
        assert!(config.profiles.contains_key("research"));

        config.switch_profile("research".to_string()).unwrap();
        assert_eq!(config.active_profile, "research");
    }

    #[test]
    fn test_switch_to_nonexistent_profile() {
        let mut config = Config::default();
        let result = config.switch_profile("nonexistent".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_api_key_precedence() {
        let mut config = Config::default();
        assert!(matches!(
            config.client_config(None),
            Err(CliError::Sdk(SdkError::MissingApiKey))
        ));

        config.profiles.get_mut("default").unwrap().api_key = Some("from-profile".to_string());
        assert_eq!(config.client_config(None).unwrap().api_key, "from-profile");
        assert_eq!(
            config.client_config(Some("from-flag".to_string())).unwrap().api_key,
            "from-flag"
        );
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.settings.format = OutputFormat::Json;
        config.profiles.get_mut("default").unwrap().api_key = Some("k".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.settings.format, OutputFormat::Json);
        assert_eq!(loaded.get_active_profile().unwrap().api_key.as_deref(), Some("k"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[profiles.default]\napi_key = \"abc\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        let profile = config.get_active_profile().unwrap();
        assert_eq!(profile.entity_url, DEFAULT_ENTITY_URL);
        assert_eq!(config.settings.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_unparseable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "active_profile = [not toml").unwrap();

        assert!(matches!(Config::load_from(&path), Err(CliError::Toml(_))));
        assert_eq!(Config::load_or_default(&path).active_profile, "default");
        // The broken file is left for the user to fix
        assert_eq!(fs::read_to_string(&path).unwrap(), "active_profile = [not toml");
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.active_profile, "default");
    }
}
