//! Lyrics lookups, per-song details and the final report.

use serde::{Deserialize, Serialize};

use super::ArtistMatch;

/// Result of a single lyrics lookup.
///
/// `found` reflects the outcome of the request, not whether the text is empty: a
/// successful lookup with no lyrics is still `found`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LyricsLookup {
    pub text: String,
    pub found: bool,
}

impl LyricsLookup {
    /// A successful lookup
    pub fn found(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            found: true,
        }
    }

    /// A failed lookup: empty text, not found
    pub fn missing() -> Self {
        Self::default()
    }
}

/// Word count for one distinct title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongDetail {
    pub title: String,
    pub word_count: usize,
    pub lyrics_found: bool,
}

/// Means over all songs and over the songs with lyrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    /// Mean word count across every distinct title
    pub mean_all_songs: f64,

    /// Mean word count across titles whose lyrics were found, 0 if none were
    pub mean_found_songs: f64,

    /// Number of titles whose lyrics were found
    pub count_found: usize,
}

/// Everything a completed run produced
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Artist name as searched for
    pub artist: String,

    /// Catalog match used for the recording listing
    pub artist_match: ArtistMatch,

    /// Number of recordings listed, duplicates included
    pub recording_count: usize,

    /// Number of distinct titles looked up
    pub distinct_title_count: usize,

    /// Per-title details in first-seen order
    pub songs: Vec<SongDetail>,

    /// Word counts for every title
    pub all_word_counts: Vec<usize>,

    /// Word counts for titles whose lyrics were found
    pub found_word_counts: Vec<usize>,

    pub summary: SummaryResult,
}
