//! Catalog models: the resolved artist and the recordings listed for it.

use serde::{Deserialize, Serialize};

/// The catalog's best match for a free-text artist name.
///
/// A confidence of `0` means no usable match; in that case the identifier and the
/// matched name are empty. Only the first candidate returned by the catalog is ever
/// kept, disambiguation between several candidates is left to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistMatch {
    /// Catalog identifier (MusicBrainz ID)
    pub identifier: String,

    /// Match score reported by the catalog (0-100)
    pub confidence: u32,

    /// Canonical artist name as stored in the catalog
    pub matched_name: String,
}

impl ArtistMatch {
    /// Create a match
    pub fn new(
        identifier: impl Into<String>,
        confidence: u32,
        matched_name: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            confidence,
            matched_name: matched_name.into(),
        }
    }

    /// The "not found" result: zero confidence, empty identifier and name
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether the catalog returned anything usable
    pub fn is_match(&self) -> bool {
        self.confidence > 0
    }
}

/// A single recording listed for an artist.
///
/// The pipeline only consumes `title`; the remaining fields are kept so the JSON
/// report can show what the catalog returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    /// Recording MBID
    #[serde(default)]
    pub id: String,

    /// Recording title
    pub title: String,

    /// Length in milliseconds
    #[serde(default)]
    pub length: Option<u64>,

    /// First release date (YYYY, YYYY-MM or YYYY-MM-DD)
    #[serde(rename = "first-release-date", default)]
    pub first_release_date: Option<String>,
}

impl Recording {
    /// Create a recording with only a title
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            length: None,
            first_release_date: None,
        }
    }
}

/// One page of a paginated recording listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingPage {
    /// Recordings on this page
    pub recordings: Vec<Recording>,

    /// Total number of recordings the catalog reports for the artist
    pub total_count: usize,

    /// Offset this page starts at
    pub offset: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artist_match_none() {
        let none = ArtistMatch::none();
        assert_eq!(none.confidence, 0);
        assert!(none.identifier.is_empty());
        assert!(none.matched_name.is_empty());
        assert!(!none.is_match());
    }

    #[test]
    fn test_artist_match_is_match() {
        let m = ArtistMatch::new("6a81fbbc-acea-4221-9199-957842125078", 100, "Nova Twins");
        assert!(m.is_match());

        let weak = ArtistMatch::new("some-id", 1, "Someone");
        assert!(weak.is_match());
    }

    #[test]
    fn test_recording_deserialize() {
        let json = r#"{
            "length": 138000,
            "title": "Ivory Tower",
            "id": "052e1145-af9d-4bca-a35d-3be126230c0f",
            "video": false,
            "first-release-date": "2020-02-28",
            "disambiguation": ""
        }"#;

        let recording: Recording = serde_json::from_str(json).unwrap();
        assert_eq!(recording.title, "Ivory Tower");
        assert_eq!(recording.length, Some(138000));
        assert_eq!(recording.first_release_date.as_deref(), Some("2020-02-28"));
    }

    #[test]
    fn test_recording_deserialize_title_only() {
        let recording: Recording = serde_json::from_str(r#"{"title": "Vortex"}"#).unwrap();
        assert_eq!(recording, Recording::titled("Vortex"));
    }
}
