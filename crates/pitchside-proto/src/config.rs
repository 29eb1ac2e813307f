use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::platform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub player: PlayerConfig,
}

/// Remote data service the client talks to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base endpoint; `/scrape` and `/stream` are appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request budget in seconds. The request is aborted on expiry.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Show the live preview on the home page.
    #[serde(default = "default_true")]
    pub home_preview: bool,
    #[serde(default = "default_home_preview_len")]
    pub home_preview_len: usize,
    /// Mirror every rendered card into the search page index.
    #[serde(default = "default_true")]
    pub search_index: bool,
    #[serde(default = "default_filter_debounce_ms")]
    pub filter_debounce_ms: u64,
    /// Reload matches every N seconds. 0 disables automatic reloads.
    #[serde(default)]
    pub refresh_interval_secs: u64,
}

/// External player used for resolved stream links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_player_command")]
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Start the player as soon as the viewer opens.
    #[serde(default)]
    pub autoplay: bool,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl UiConfig {
    pub fn filter_debounce(&self) -> Duration {
        Duration::from_millis(self.filter_debounce_ms)
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_secs > 0).then(|| Duration::from_secs(self.refresh_interval_secs))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            home_preview: true,
            home_preview_len: default_home_preview_len(),
            search_index: true,
            filter_debounce_ms: default_filter_debounce_ms(),
            refresh_interval_secs: 0,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            command: default_player_command(),
            args: Vec::new(),
            autoplay: false,
        }
    }
}

fn default_base_url() -> String {
    "http://api.sportliveserver.abrdns.com".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_true() -> bool {
    true
}

fn default_home_preview_len() -> usize {
    4
}

fn default_filter_debounce_ms() -> u64 {
    160
}

fn default_player_command() -> String {
    "mpv".to_string()
}

impl Config {
    /// Load from the default location, writing defaults on first run.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}
