//! Application Configuration
//!
//! User settings stored in TOML format. The four top-level sections mirror
//! the exportable state categories: `parameters`, `keybinds`, `discord`
//! and `configuration`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::capture::BBox;

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Automation parameters
    #[serde(default)]
    pub parameters: ParametersConfig,
    /// Action-to-key bindings (consumed by the external hotkey layer)
    #[serde(default = "default_keybinds")]
    pub keybinds: BTreeMap<String, String>,
    /// Discord notification settings
    #[serde(default)]
    pub discord: DiscordConfig,
    /// General application settings
    #[serde(default)]
    pub configuration: GeneralConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            parameters: ParametersConfig::default(),
            keybinds: default_keybinds(),
            discord: DiscordConfig::default(),
            configuration: GeneralConfig::default(),
        }
    }
}

/// Automation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParametersConfig {
    /// Desktop region sampled each tick
    pub capture_region: Option<BBox>,
    /// Delay between capture ticks in milliseconds
    pub tick_interval_ms: u64,
    /// Dispatch a click on every tick
    pub auto_click: bool,
    /// Minimum delay between dispatched clicks in milliseconds
    pub click_delay_ms: u64,
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            capture_region: None,
            tick_interval_ms: 33,
            auto_click: false,
            click_delay_ms: 200,
        }
    }
}

/// Discord notification settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Send notifications at all
    pub enabled: bool,
    /// Webhook endpoint
    pub webhook_url: String,
    /// User to mention in notifications
    pub user_id: String,
    /// Notify when a bulk operation finishes
    pub notify_on_complete: bool,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            webhook_url: String::new(),
            user_id: String::new(),
            notify_on_complete: true,
        }
    }
}

/// General application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Start minimized to the taskbar
    pub start_minimized: bool,
    /// Directory for frame snapshots; defaults next to the executable
    pub snapshot_dir: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            start_minimized: false,
            snapshot_dir: None,
        }
    }
}

fn default_keybinds() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("toggle_automation".to_string(), "F6".to_string()),
        ("test_click".to_string(), "F7".to_string()),
        ("snapshot".to_string(), "F8".to_string()),
    ])
}

/// Default config file location under the user's config directory.
pub fn config_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "dig-tool")
        .context("could not resolve a config directory")?;
    std::fs::create_dir_all(dirs.config_dir())?;
    Ok(dirs.config_dir().join("config.toml"))
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_app_config() {
        let config = AppConfig::default();

        assert!(config.parameters.capture_region.is_none());
        assert_eq!(config.parameters.tick_interval_ms, 33);
        assert!(!config.parameters.auto_click);

        assert!(!config.discord.enabled);
        assert!(config.discord.webhook_url.is_empty());
        assert!(config.discord.notify_on_complete);

        assert!(!config.configuration.start_minimized);
        assert!(config.configuration.snapshot_dir.is_none());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut config = AppConfig::default();
        config.parameters.capture_region = Some(BBox::new(10, 20, 110, 70));
        config.keybinds = default_keybinds();

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(config, parsed);
    }

    #[test]
    fn test_save_and_load_config() {
        let mut config = AppConfig::default();
        config.discord.enabled = true;
        config.discord.webhook_url = "https://discord.test/hook".to_string();

        let temp_file = NamedTempFile::new().unwrap();
        save_config(&config, temp_file.path()).unwrap();
        let loaded = load_config(temp_file.path()).unwrap();

        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_config_missing_sections_fall_back() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[parameters]\ntick_interval_ms = 50\nauto_click = true\nclick_delay_ms = 100").unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.parameters.tick_interval_ms, 50);
        assert!(config.parameters.auto_click);
        // Missing sections take defaults, including the stock keybinds.
        assert_eq!(config.keybinds.get("toggle_automation").unwrap(), "F6");
        assert!(!config.discord.enabled);
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "this is not valid toml {{{{").unwrap();

        assert!(load_config(temp_file.path()).is_err());
    }

    #[test]
    fn test_load_config_file_not_found() {
        assert!(load_config(Path::new("/nonexistent/path/config.toml")).is_err());
    }
}
