use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub notification: NotificationConfig,
    #[serde(default)]
    pub freshness: FreshnessConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Where project records come from. A local `file` wins over `url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Prefix for per-project routes (e.g. "https://catalog.internal")
    #[serde(default)]
    pub web_url: Option<String>,
    /// Request timeout for the HTTP source, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            url: default_url(),
            file: None,
            web_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// How long a notification stays visible
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        NotificationConfig {
            duration_ms: default_duration_ms(),
        }
    }
}

fn default_duration_ms() -> u64 {
    5000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreshnessConfig {
    /// Records younger than this many days get the NEW badge
    #[serde(default = "default_new_days")]
    pub new_days: i64,
}

impl Default for FreshnessConfig {
    fn default() -> Self {
        FreshnessConfig {
            new_days: default_new_days(),
        }
    }
}

fn default_new_days() -> i64 {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Hex color overrides keyed by theme slot (e.g. `background = "#101010"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Per-tech label colors
    #[serde(default)]
    pub tech_colors: HashMap<String, String>,
}
