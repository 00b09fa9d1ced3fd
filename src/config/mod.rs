//! Configuration management.
//!
//! Every setting has a default matching the public MusicBrainz and lyrics.ovh
//! services, so a configuration file is optional. Values are layered as: defaults,
//! then a TOML file, then `LYRIC_STATS_*` environment variables, then CLI flags.

mod file_config;

pub use file_config::{default_config_path, find_config_file, load_config};

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Metadata catalog (MusicBrainz) settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Lyrics service settings
    #[serde(default)]
    pub lyrics: LyricsConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Metadata catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the MusicBrainz web service
    #[serde(default = "default_catalog_url")]
    pub base_url: String,

    /// Recordings requested per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Pause between two page requests, in milliseconds
    #[serde(default = "default_page_cooldown_ms")]
    pub page_cooldown_ms: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_catalog_url(),
            page_size: default_page_size(),
            page_cooldown_ms: default_page_cooldown_ms(),
        }
    }
}

impl CatalogConfig {
    pub fn page_cooldown(&self) -> Duration {
        Duration::from_millis(self.page_cooldown_ms)
    }
}

fn default_catalog_url() -> String {
    "https://musicbrainz.org/ws/2".to_string()
}

fn default_page_size() -> usize {
    100
}

fn default_page_cooldown_ms() -> u64 {
    2000
}

/// Lyrics service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LyricsConfig {
    /// Base URL of the lyrics.ovh API
    #[serde(default = "default_lyrics_url")]
    pub base_url: String,

    /// Pause after each lyrics lookup, in milliseconds
    #[serde(default = "default_lyrics_cooldown_ms")]
    pub cooldown_ms: u64,
}

impl Default for LyricsConfig {
    fn default() -> Self {
        Self {
            base_url: default_lyrics_url(),
            cooldown_ms: default_lyrics_cooldown_ms(),
        }
    }
}

impl LyricsConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

fn default_lyrics_url() -> String {
    "https://api.lyrics.ovh/v1".to_string()
}

fn default_lyrics_cooldown_ms() -> u64 {
    1000
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// User agent sent to both services (MusicBrainz rejects anonymous clients)
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            user_agent: None,
        }
    }
}

impl HttpConfig {
    /// The configured user agent, or `lyric-stats/<version>`
    pub fn user_agent(&self) -> String {
        self.user_agent.clone().unwrap_or_else(|| {
            concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
        })
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `json` for structured output, anything else for the human format
    #[serde(default)]
    pub format: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Check values that would make the pipeline misbehave
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.page_size == 0 {
            return Err(ConfigError::Invalid(
                "catalog.page_size must be greater than 0".to_string(),
            ));
        }

        for (key, value) in [
            ("catalog.base_url", &self.catalog.base_url),
            ("lyrics.base_url", &self.lyrics.base_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| ConfigError::Invalid(format!("{} '{}': {}", key, value, e)))?;
        }

        Ok(())
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}
