//! Mock catalog and lyrics provider for testing purposes.
//!
//! Both mocks record every call together with the (tokio) time it was made, so
//! tests can check request order and the spacing imposed by cooldowns.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::time::Instant;

use crate::models::{ArtistMatch, Recording, RecordingPage};
use crate::sources::{ArtistCatalog, LyricsProvider, SourceError};

/// A mock catalog that returns predefined artist matches and recording pages.
#[derive(Debug, Default)]
pub struct MockCatalog {
    artist: Mutex<Option<ArtistMatch>>,
    pages: Mutex<HashMap<usize, RecordingPage>>,
    page_requests: Mutex<Vec<(usize, usize, Instant)>>,
}

impl MockCatalog {
    /// Create a mock whose every request fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the artist search result. Without one, searches fail.
    pub fn set_artist(&self, artist: ArtistMatch) {
        let mut guard = self.artist.lock().unwrap();
        *guard = Some(artist);
    }

    /// Serve `titles` as recordings split into pages of `page_size`.
    pub fn set_recordings(&self, titles: &[&str], page_size: usize) {
        let total = titles.len();
        let mut pages = self.pages.lock().unwrap();
        pages.clear();

        for (index, chunk) in titles.chunks(page_size.max(1)).enumerate() {
            let offset = index * page_size;
            pages.insert(
                offset,
                RecordingPage {
                    recordings: chunk.iter().map(|t| Recording::titled(*t)).collect(),
                    total_count: total,
                    offset,
                },
            );
        }
    }

    /// Make the page starting at `offset` fail.
    pub fn fail_page(&self, offset: usize) {
        self.pages.lock().unwrap().remove(&offset);
    }

    /// Offsets requested so far, in order
    pub fn requested_offsets(&self) -> Vec<usize> {
        let guard = self.page_requests.lock().unwrap();
        guard.iter().map(|(offset, _, _)| *offset).collect()
    }

    /// Times at which pages were requested, in order
    pub fn request_times(&self) -> Vec<Instant> {
        let guard = self.page_requests.lock().unwrap();
        guard.iter().map(|(_, _, at)| *at).collect()
    }
}

#[async_trait]
impl ArtistCatalog for MockCatalog {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Catalog"
    }

    async fn search_artist(&self, _name: &str) -> Result<ArtistMatch, SourceError> {
        let guard = self.artist.lock().unwrap();
        match &*guard {
            Some(artist) => Ok(artist.clone()),
            None => Err(SourceError::Api("mock artist search failed".to_string())),
        }
    }

    async fn recording_page(
        &self,
        _artist_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<RecordingPage, SourceError> {
        self.page_requests
            .lock()
            .unwrap()
            .push((offset, limit, Instant::now()));

        let guard = self.pages.lock().unwrap();
        guard
            .get(&offset)
            .cloned()
            .ok_or_else(|| SourceError::Api(format!("mock page at offset {} failed", offset)))
    }
}

/// A mock lyrics provider keyed by song title.
///
/// Titles without configured lyrics answer with [`SourceError::NotFound`].
#[derive(Debug, Default)]
pub struct MockLyrics {
    lyrics: Mutex<HashMap<String, String>>,
    unreadable: Mutex<Vec<String>>,
    requests: Mutex<Vec<(String, Instant)>>,
}

impl MockLyrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `lyrics` for `title`
    pub fn set_lyrics(&self, title: &str, lyrics: &str) {
        let mut guard = self.lyrics.lock().unwrap();
        guard.insert(title.to_string(), lyrics.to_string());
    }

    /// Answer `title` with a body that cannot be parsed
    pub fn set_unreadable(&self, title: &str) {
        self.unreadable.lock().unwrap().push(title.to_string());
    }

    /// Titles requested so far, in order
    pub fn requested_titles(&self) -> Vec<String> {
        let guard = self.requests.lock().unwrap();
        guard.iter().map(|(title, _)| title.clone()).collect()
    }

    /// Times at which lyrics were requested, in order
    pub fn request_times(&self) -> Vec<Instant> {
        let guard = self.requests.lock().unwrap();
        guard.iter().map(|(_, at)| *at).collect()
    }
}

#[async_trait]
impl LyricsProvider for MockLyrics {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Lyrics"
    }

    async fn lyrics(&self, _artist: &str, title: &str) -> Result<String, SourceError> {
        self.requests
            .lock()
            .unwrap()
            .push((title.to_string(), Instant::now()));

        if self.unreadable.lock().unwrap().iter().any(|t| t == title) {
            return Err(SourceError::Parse(format!("mock body for {} is not JSON", title)));
        }

        let guard = self.lyrics.lock().unwrap();
        guard
            .get(title)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(title.to_string()))
    }
}
