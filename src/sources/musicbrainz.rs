//! MusicBrainz catalog implementation.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;

use crate::config::Config;
use crate::models::{ArtistMatch, Recording, RecordingPage};
use crate::sources::{read_json, ArtistCatalog, SourceError};
use crate::utils::HttpClient;

const MUSICBRAINZ_API_BASE: &str = "https://musicbrainz.org/ws/2";

/// MusicBrainz catalog
///
/// Uses the MusicBrainz web service (v2) search endpoints with JSON responses.
#[derive(Debug, Clone)]
pub struct MusicBrainzSource {
    client: Arc<HttpClient>,
    base_url: String,
}

impl MusicBrainzSource {
    pub fn new() -> Result<Self, SourceError> {
        Ok(Self::with_client(
            Arc::new(HttpClient::new()?),
            MUSICBRAINZ_API_BASE,
        ))
    }

    /// Create from the `[catalog]` and `[http]` configuration sections
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        let client = HttpClient::from_config(&config.http)?;
        Ok(Self::with_client(Arc::new(client), &config.catalog.base_url))
    }

    /// Create with a shared client and a custom base URL (e.g. a mirror or a test server)
    pub fn with_client(client: Arc<HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, entity: &str) -> String {
        format!("{}/{}/", self.base_url.trim_end_matches('/'), entity)
    }
}

#[async_trait]
impl ArtistCatalog for MusicBrainzSource {
    fn id(&self) -> &str {
        "musicbrainz"
    }

    fn name(&self) -> &str {
        "MusicBrainz"
    }

    async fn search_artist(&self, name: &str) -> Result<ArtistMatch, SourceError> {
        if name.trim().is_empty() {
            return Err(SourceError::InvalidRequest(
                "artist name is empty".to_string(),
            ));
        }

        let url = self.endpoint("artist");
        tracing::debug!(query = %name, url = %url, "Searching MusicBrainz artists");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(&[("query", name)])
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to search MusicBrainz: {}", e)))?;

        let data: MBArtistSearch = read_json(response, "MusicBrainz artist search").await?;

        if data.count == 0 {
            return Ok(ArtistMatch::none());
        }

        // Only the best-scored candidate is used; MusicBrainz sorts by score
        Ok(data
            .artists
            .into_iter()
            .next()
            .map(|artist| ArtistMatch::new(artist.id, artist.score, artist.name))
            .unwrap_or_default())
    }

    async fn recording_page(
        &self,
        artist_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<RecordingPage, SourceError> {
        let url = self.endpoint("recording");
        tracing::debug!(artist = %artist_id, offset, limit, "Fetching MusicBrainz recordings");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(&[
                ("artist", artist_id.to_string()),
                ("offset", offset.to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                SourceError::Network(format!("Failed to fetch MusicBrainz recordings: {}", e))
            })?;

        let data: MBRecordingList = read_json(response, "MusicBrainz recording search").await?;

        Ok(RecordingPage {
            recordings: data.recordings,
            total_count: data.recording_count,
            offset: data.recording_offset.unwrap_or(offset),
        })
    }
}

// ===== MusicBrainz API Types =====

#[derive(Debug, Deserialize)]
struct MBArtistSearch {
    #[serde(default)]
    count: usize,
    #[serde(default)]
    artists: Vec<MBArtist>,
}

#[derive(Debug, Deserialize)]
struct MBArtist {
    id: String,
    #[serde(default, deserialize_with = "deserialize_score")]
    score: u32,
    name: String,
}

#[derive(Debug, Deserialize)]
struct MBRecordingList {
    #[serde(rename = "recording-count")]
    recording_count: usize,
    #[serde(rename = "recording-offset", default)]
    recording_offset: Option<usize>,
    #[serde(default)]
    recordings: Vec<Recording>,
}

/// Older MusicBrainz responses report the score as a string ("100")
fn deserialize_score<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Score {
        Number(u32),
        Text(String),
    }

    match Score::deserialize(deserializer)? {
        Score::Number(n) => Ok(n),
        Score::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const ARTIST_ID: &str = "6a81fbbc-acea-4221-9199-957842125078";

    const GOOD_ARTIST_RESPONSE: &str = r#"{
        "created": "2022-05-08T09:09:58.496Z",
        "count": 2772,
        "offset": 0,
        "artists": [
            {
                "id": "6a81fbbc-acea-4221-9199-957842125078",
                "type": "Group",
                "score": 100,
                "name": "Nova Twins",
                "sort-name": "Nova Twins",
                "country": "GB",
                "life-span": {"begin": "2014", "ended": null}
            },
            {
                "id": "0b5b0c2a-1111-2222-3333-444455556666",
                "type": "Person",
                "score": 62,
                "name": "Nova",
                "sort-name": "Nova"
            }
        ]
    }"#;

    const EMPTY_ARTIST_RESPONSE: &str = r#"{
        "created": "2022-05-08T09:12:16.770Z",
        "count": 0,
        "offset": 0,
        "artists": []
    }"#;

    const RECORDINGS_PAGE_1: &str = r#"{
        "recordings": [
            {
                "length": 138000,
                "title": "Ivory Tower",
                "id": "052e1145-af9d-4bca-a35d-3be126230c0f",
                "video": false,
                "first-release-date": "2020-02-28",
                "disambiguation": ""
            },
            {
                "title": "Vortex",
                "length": 189000,
                "disambiguation": "",
                "first-release-date": "2020-02-28",
                "video": false,
                "id": "06bf478d-7234-48ca-8499-21f35150723c"
            }
        ],
        "recording-count": 4,
        "recording-offset": 0
    }"#;

    fn source_for(server: &mockito::ServerGuard) -> MusicBrainzSource {
        MusicBrainzSource::with_client(Arc::new(HttpClient::new().unwrap()), server.url())
    }

    #[test]
    fn test_source_id_and_name() {
        let source = MusicBrainzSource::new().unwrap();
        assert_eq!(source.id(), "musicbrainz");
        assert_eq!(source.name(), "MusicBrainz");
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = Arc::new(HttpClient::new().unwrap());
        let source = MusicBrainzSource::with_client(client, "http://localhost/ws/2/");
        assert_eq!(source.endpoint("artist"), "http://localhost/ws/2/artist/");
    }

    #[test]
    fn test_score_as_string() {
        let artist: MBArtist =
            serde_json::from_str(r#"{"id": "x", "score": "87", "name": "Someone"}"#).unwrap();
        assert_eq!(artist.score, 87);

        let artist: MBArtist =
            serde_json::from_str(r#"{"id": "x", "score": 55, "name": "Someone"}"#).unwrap();
        assert_eq!(artist.score, 55);
    }

    #[tokio::test]
    async fn test_search_artist_returns_first_candidate() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/artist/")
            .match_query(Matcher::UrlEncoded("query".into(), "nova twins".into()))
            .match_header("accept", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(GOOD_ARTIST_RESPONSE)
            .create_async()
            .await;

        let artist = source_for(&server).search_artist("nova twins").await.unwrap();

        assert_eq!(artist.identifier, ARTIST_ID);
        assert_eq!(artist.confidence, 100);
        assert_eq!(artist.matched_name, "Nova Twins");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_artist_no_results() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/artist/")
            .match_query(Matcher::UrlEncoded("query".into(), "nothing".into()))
            .with_status(200)
            .with_body(EMPTY_ARTIST_RESPONSE)
            .create_async()
            .await;

        let artist = source_for(&server).search_artist("nothing").await.unwrap();
        assert_eq!(artist, ArtistMatch::none());
    }

    #[tokio::test]
    async fn test_search_artist_count_without_candidates() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/artist/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"count": 3, "artists": []}"#)
            .create_async()
            .await;

        let artist = source_for(&server).search_artist("ghost").await.unwrap();
        assert!(!artist.is_match());
    }

    #[tokio::test]
    async fn test_search_artist_bad_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/artist/")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body("bad request")
            .create_async()
            .await;

        let result = source_for(&server).search_artist("bad_response").await;
        assert!(matches!(result, Err(SourceError::Api(_))));
    }

    #[tokio::test]
    async fn test_search_artist_empty_name() {
        let server = mockito::Server::new_async().await;
        let result = source_for(&server).search_artist("   ").await;
        assert!(matches!(result, Err(SourceError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_recording_page() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/recording/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("artist".into(), ARTIST_ID.into()),
                Matcher::UrlEncoded("offset".into(), "0".into()),
                Matcher::UrlEncoded("limit".into(), "100".into()),
            ]))
            .match_header("accept", "application/json")
            .with_status(200)
            .with_body(RECORDINGS_PAGE_1)
            .create_async()
            .await;

        let page = source_for(&server)
            .recording_page(ARTIST_ID, 0, 100)
            .await
            .unwrap();

        assert_eq!(page.total_count, 4);
        assert_eq!(page.offset, 0);
        assert_eq!(page.recordings.len(), 2);
        assert_eq!(page.recordings[0].title, "Ivory Tower");
        assert_eq!(page.recordings[1].title, "Vortex");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_recording_page_rate_limited() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/recording/")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let result = source_for(&server).recording_page(ARTIST_ID, 0, 100).await;
        assert!(matches!(result, Err(SourceError::RateLimit)));
    }

    #[tokio::test]
    async fn test_recording_page_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/recording/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"recordings": []}"#)
            .create_async()
            .await;

        let result = source_for(&server).recording_page(ARTIST_ID, 0, 100).await;
        assert!(matches!(result, Err(SourceError::Parse(_))));
    }

    #[tokio::test]
    async fn test_search_artist_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/artist/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let result = source_for(&server).search_artist("nova twins").await;
        assert!(matches!(result, Err(SourceError::Parse(_))));
    }
}
