//! The lyrics word-count pipeline.
//!
//! ```text
//! resolve_artist -> enumerate_recordings -> distinct_titles -> aggregate -> summarize
//! ```
//!
//! Every stage runs sequentially. Upstream failures never abort a run: they are
//! absorbed into "no match", "fewer recordings" or "lyrics not found" at the stage
//! that made the request. A run only stops early when the artist cannot be resolved
//! or when no titles are left to look up.

mod catalog;
mod lyrics;
mod stats;

pub use catalog::{enumerate_recordings, resolve_artist};
pub use lyrics::{aggregate, count_words, fetch_lyrics, Aggregation};
pub use stats::{mean, summarize, StatsError};

use serde::Serialize;
use std::sync::Arc;

use crate::config::Config;
use crate::models::{ArtistMatch, Report, SongDetail};
use crate::sources::{
    ArtistCatalog, LyricsOvhSource, LyricsProvider, MusicBrainzSource, SourceError,
};
use crate::utils::{distinct_titles, Cooldown};

/// Pagination and pacing settings for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Recordings requested per catalog page
    pub page_size: usize,

    /// Pause between two catalog pages
    pub page_cooldown: Cooldown,

    /// Pause after each lyrics lookup
    pub lyrics_cooldown: Cooldown,
}

impl PipelineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            page_size: config.catalog.page_size,
            page_cooldown: Cooldown::new(config.catalog.page_cooldown()),
            lyrics_cooldown: Cooldown::new(config.lyrics.cooldown()),
        }
    }

    /// Same page size, no pauses at all
    pub fn without_cooldowns(self) -> Self {
        Self {
            page_cooldown: Cooldown::none(),
            lyrics_cooldown: Cooldown::none(),
            ..self
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Progress notifications emitted while a run advances
#[derive(Debug, Clone, Copy)]
pub enum PipelineEvent<'a> {
    /// The artist search finished (possibly without a match)
    ArtistResolved(&'a ArtistMatch),

    /// All recording pages were fetched
    RecordingsListed { count: usize },

    /// Recording titles were deduplicated
    TitlesDeduplicated { count: usize },

    /// Lyrics lookups are about to start
    LyricsStarted { total: usize },

    /// One title was looked up
    SongCompleted {
        index: usize,
        total: usize,
        song: &'a SongDetail,
    },
}

/// How a run ended
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The catalog had no usable match for the artist name
    NoArtistMatch,

    /// The artist was found but has no recordings to look up
    NoTitles {
        artist_match: ArtistMatch,
        recording_count: usize,
    },

    /// Lyrics were looked up for every distinct title
    Completed(Report),
}

/// Runs the whole pipeline against a catalog and a lyrics provider
#[derive(Debug, Clone)]
pub struct LyricStats {
    catalog: Arc<dyn ArtistCatalog>,
    lyrics: Arc<dyn LyricsProvider>,
    settings: PipelineSettings,
}

impl LyricStats {
    pub fn new(
        catalog: Arc<dyn ArtistCatalog>,
        lyrics: Arc<dyn LyricsProvider>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            catalog,
            lyrics,
            settings,
        }
    }

    /// MusicBrainz plus lyrics.ovh, configured from `config`
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        Ok(Self::new(
            Arc::new(MusicBrainzSource::from_config(config)?),
            Arc::new(LyricsOvhSource::from_config(config)?),
            PipelineSettings::from_config(config),
        ))
    }

    /// Run without progress notifications
    pub async fn run(&self, artist: &str) -> Result<RunOutcome, StatsError> {
        self.run_with(artist, |_| {}).await
    }

    /// Run, calling `on_event` as each stage completes
    pub async fn run_with<F>(
        &self,
        artist: &str,
        mut on_event: F,
    ) -> Result<RunOutcome, StatsError>
    where
        F: FnMut(PipelineEvent<'_>),
    {
        tracing::info!(artist = %artist, "Searching catalog for artist");
        let artist_match = resolve_artist(self.catalog.as_ref(), artist).await;
        on_event(PipelineEvent::ArtistResolved(&artist_match));

        if !artist_match.is_match() {
            return Ok(RunOutcome::NoArtistMatch);
        }

        let recordings = enumerate_recordings(
            self.catalog.as_ref(),
            &artist_match.identifier,
            self.settings.page_size,
            self.settings.page_cooldown,
        )
        .await;
        on_event(PipelineEvent::RecordingsListed {
            count: recordings.len(),
        });

        let titles = distinct_titles(&recordings);
        tracing::debug!(
            recordings = recordings.len(),
            titles = titles.len(),
            "Dropped {} duplicate titles",
            recordings.len() - titles.len()
        );
        on_event(PipelineEvent::TitlesDeduplicated {
            count: titles.len(),
        });

        if titles.is_empty() {
            return Ok(RunOutcome::NoTitles {
                artist_match,
                recording_count: recordings.len(),
            });
        }

        let total = titles.len();
        tracing::info!(titles = total, "Retrieving lyrics");
        on_event(PipelineEvent::LyricsStarted { total });

        let aggregation = aggregate(
            self.lyrics.as_ref(),
            artist,
            &titles,
            self.settings.lyrics_cooldown,
            |index, song| on_event(PipelineEvent::SongCompleted { index, total, song }),
        )
        .await;

        let summary = summarize(&aggregation)?;

        Ok(RunOutcome::Completed(Report {
            artist: artist.to_string(),
            artist_match,
            recording_count: recordings.len(),
            distinct_title_count: total,
            songs: aggregation.details,
            all_word_counts: aggregation.all_word_counts,
            found_word_counts: aggregation.found_word_counts,
            summary,
        }))
    }
}
