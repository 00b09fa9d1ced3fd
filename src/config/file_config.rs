//! Configuration file support for lyric-stats.
//!
//! This module layers a TOML configuration file and environment variable
//! overrides on top of the built-in defaults.
//!
//! # Configuration File Format
//!
//! ```toml
//! [catalog]
//! base_url = "https://musicbrainz.org/ws/2"
//! page_size = 100
//! page_cooldown_ms = 2000
//!
//! [lyrics]
//! base_url = "https://api.lyrics.ovh/v1"
//! cooldown_ms = 1000
//!
//! [http]
//! timeout_secs = 30
//! connect_timeout_secs = 10
//! user_agent = "lyric-stats/0.1.0 (me@example.com)"
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```
//!
//! # Environment Variables
//!
//! Any key can be overridden with `LYRIC_STATS_<SECTION>__<KEY>`, for example
//! `LYRIC_STATS_CATALOG__PAGE_SIZE=25`.

use std::path::{Path, PathBuf};

use super::{Config, ConfigError};

const ENV_PREFIX: &str = "LYRIC_STATS";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Load configuration from an optional file plus the environment
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    load_with_prefix(path, ENV_PREFIX)
}

fn load_with_prefix(path: Option<&Path>, prefix: &str) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: Config = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// `<config dir>/lyric-stats/config.toml`, if the platform has a config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(env!("CARGO_PKG_NAME")).join(CONFIG_FILE_NAME))
}

/// Find a configuration file in the default locations
///
/// Checks `./lyric-stats.toml` first, then the platform config directory.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(concat!(env!("CARGO_PKG_NAME"), ".toml"));
    if local.is_file() {
        return Some(local);
    }

    default_config_path().filter(|path| path.is_file())
}
