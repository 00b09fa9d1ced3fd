//! lyrics.ovh lyrics provider.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::config::Config;
use crate::sources::{read_json, LyricsProvider, SourceError};
use crate::utils::HttpClient;

const LYRICS_OVH_API_BASE: &str = "https://api.lyrics.ovh/v1";

/// lyrics.ovh provider
///
/// Looks songs up at `{base}/{artist}/{title}`. Artist and title go into the path as
/// given; the HTTP client only escapes what the URL syntax requires.
#[derive(Debug, Clone)]
pub struct LyricsOvhSource {
    client: Arc<HttpClient>,
    base_url: String,
}

impl LyricsOvhSource {
    pub fn new() -> Result<Self, SourceError> {
        Ok(Self::with_client(
            Arc::new(HttpClient::new()?),
            LYRICS_OVH_API_BASE,
        ))
    }

    /// Create from the `[lyrics]` and `[http]` configuration sections
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        let client = HttpClient::from_config(&config.http)?;
        Ok(Self::with_client(Arc::new(client), &config.lyrics.base_url))
    }

    /// Create with a shared client and a custom base URL
    pub fn with_client(client: Arc<HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn song_url(&self, artist: &str, title: &str) -> String {
        format!("{}/{}/{}", self.base_url.trim_end_matches('/'), artist, title)
    }
}

#[async_trait]
impl LyricsProvider for LyricsOvhSource {
    fn id(&self) -> &str {
        "lyrics_ovh"
    }

    fn name(&self) -> &str {
        "lyrics.ovh"
    }

    async fn lyrics(&self, artist: &str, title: &str) -> Result<String, SourceError> {
        let url = self.song_url(artist, title);
        tracing::debug!(artist = %artist, title = %title, "Fetching lyrics");

        let response =
            self.client.get(&url).send().await.map_err(|e| {
                SourceError::Network(format!("Failed to fetch lyrics for {}: {}", title, e))
            })?;

        let data: LyricsResponse = read_json(response, "lyrics.ovh").await?;
        Ok(data.lyrics.unwrap_or_default())
    }
}

// ===== lyrics.ovh API Types =====

#[derive(Debug, Deserialize)]
struct LyricsResponse {
    #[serde(default)]
    lyrics: Option<String>,
}
