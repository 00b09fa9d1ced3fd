//! # Lyric Stats
//!
//! Works out how wordy an artist is: resolves an artist name against the MusicBrainz
//! catalog, enumerates the artist's distinct recording titles, looks up lyrics for each
//! title on lyrics.ovh and reports the mean word count.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (ArtistMatch, Recording, SongDetail, Report, etc.)
//! - [`sources`]: Upstream API clients behind the [`ArtistCatalog`] and [`LyricsProvider`] traits
//! - [`pipeline`]: Resolver, enumerator, lyrics aggregation and the [`LyricStats`] orchestrator
//! - [`utils`]: HTTP client, title deduplication and request cooldowns
//! - [`config`]: Configuration management
//! - [`ui`]: Terminal output helpers used by the binary

pub mod config;
pub mod models;
pub mod pipeline;
pub mod sources;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use models::{ArtistMatch, Report, SongDetail, SummaryResult};
pub use pipeline::{LyricStats, RunOutcome};
pub use sources::{ArtistCatalog, LyricsProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
