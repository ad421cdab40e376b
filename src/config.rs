use crate::models::FilterValues;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub filters: FilterValues,
    #[serde(default)]
    pub reveal: RevealSettings,
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiSettings {
    /// Prefix for every endpoint path. Empty means "same origin", which only
    /// resolves inside a page; outside of one every request fails.
    #[serde(default)]
    pub base_url: String,
    /// No timeout unless set.
    pub timeout_secs: Option<u64>,
}

impl ApiSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RevealSettings {
    #[serde(default = "default_stagger_ms")]
    pub stagger_ms: u64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            stagger_ms: default_stagger_ms(),
            threshold: default_threshold(),
        }
    }
}

impl RevealSettings {
    pub fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }
}

fn default_stagger_ms() -> u64 { 100 }
fn default_threshold() -> f64 { 0.1 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderSettings {
    /// Escape server-sourced text in cards. Off by default: the API is trusted.
    #[serde(default)]
    pub escape_html: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with LISTINGS_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., LISTINGS__API__BASE_URL -> api.base_url
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("LISTINGS")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
