//! Core data models for catalog lookups, lyrics and word-count statistics.

mod catalog;
mod song;

pub use catalog::{ArtistMatch, Recording, RecordingPage};
pub use song::{LyricsLookup, Report, SongDetail, SummaryResult};
