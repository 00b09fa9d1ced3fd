//! Upstream API clients with a trait-based seam for testing.
//!
//! The pipeline talks to two services:
//!
//! - an [`ArtistCatalog`] that resolves artist names and lists their recordings
//!   ([`MusicBrainzSource`])
//! - a [`LyricsProvider`] that returns the lyrics of one song ([`LyricsOvhSource`])
//!
//! Clients report every failure as a [`SourceError`] so the cause shows up in the logs.
//! Turning those failures into "nothing found" is the pipeline's job, see
//! [`crate::pipeline`].

mod lyrics_ovh;
pub mod mock;
mod musicbrainz;

pub use lyrics_ovh::LyricsOvhSource;
pub use mock::{MockCatalog, MockLyrics};
pub use musicbrainz::MusicBrainzSource;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::models::{ArtistMatch, RecordingPage};

/// A music metadata catalog.
#[async_trait]
pub trait ArtistCatalog: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this catalog (e.g., "musicbrainz")
    fn id(&self) -> &str;

    /// Human-readable name of this catalog
    fn name(&self) -> &str;

    /// Search for an artist by free text.
    ///
    /// Returns the first candidate the catalog reports, or [`ArtistMatch::none`] when
    /// the search succeeded but found nobody.
    async fn search_artist(&self, name: &str) -> Result<ArtistMatch, SourceError>;

    /// Fetch one page of the artist's recordings
    async fn recording_page(
        &self,
        artist_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<RecordingPage, SourceError>;
}

/// A lyrics lookup service.
#[async_trait]
pub trait LyricsProvider: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this provider (e.g., "lyrics_ovh")
    fn id(&self) -> &str;

    /// Human-readable name of this provider
    fn name(&self) -> &str;

    /// Fetch the lyrics of a song.
    ///
    /// A successful response without lyrics yields an empty string, not an error.
    async fn lyrics(&self, artist: &str, title: &str) -> Result<String, SourceError>;
}

/// Errors that can occur when talking to an upstream service
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or transport error
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing error (JSON)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Rate limit exceeded (429, or 503 from MusicBrainz)
    #[error("Rate limit exceeded")]
    RateLimit,

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success status
    #[error("API error: {0}")]
    Api(String),
}

impl SourceError {
    /// Map a non-success status to an error
    pub fn from_status(status: StatusCode, context: &str) -> Self {
        match status {
            StatusCode::NOT_FOUND => SourceError::NotFound(context.to_string()),
            StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE => {
                SourceError::RateLimit
            }
            _ => SourceError::Api(format!("{} returned status: {}", context, status)),
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}

/// Read a successful response body as JSON, mapping non-2xx statuses to errors
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    context: &str,
) -> Result<T, SourceError> {
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::from_status(status, context));
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
