//! Lyrics lookup and per-song word counting.

use crate::models::{LyricsLookup, SongDetail};
use crate::sources::{LyricsProvider, SourceError};
use crate::utils::Cooldown;

/// Look up the lyrics of one song.
///
/// Failures of any kind come back as [`LyricsLookup::missing`]. A successful response
/// is `found` even when it carries no lyrics text.
pub async fn fetch_lyrics(
    provider: &dyn LyricsProvider,
    artist: &str,
    title: &str,
) -> LyricsLookup {
    match provider.lyrics(artist, title).await {
        Ok(text) => LyricsLookup::found(text),
        Err(e @ SourceError::Parse(_)) => {
            tracing::warn!(
                provider = provider.id(),
                "Unreadable lyrics from {} for '{}': {}",
                provider.name(),
                title,
                e
            );
            LyricsLookup::missing()
        }
        Err(e) => {
            tracing::debug!(
                provider = provider.id(),
                "No lyrics from {} for '{}': {}",
                provider.name(),
                title,
                e
            );
            LyricsLookup::missing()
        }
    }
}

/// Number of whitespace-separated words in a lyrics text
pub fn count_words(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    text.replace('\n', " ").split_whitespace().count()
}

/// Output of [`aggregate`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// One entry per title, in input order
    pub details: Vec<SongDetail>,

    /// Word count of every title
    pub all_word_counts: Vec<usize>,

    /// Word count of the titles whose lookup succeeded
    pub found_word_counts: Vec<usize>,
}

impl Aggregation {
    pub fn count_found(&self) -> usize {
        self.found_word_counts.len()
    }
}

/// Fetch lyrics for every title and count their words.
///
/// Titles are processed strictly one after another. `cooldown` is waited out after
/// every lookup, the last one included. `on_song` is called with the index of each
/// title once its detail is known.
pub async fn aggregate<F>(
    provider: &dyn LyricsProvider,
    artist: &str,
    titles: &[String],
    cooldown: Cooldown,
    mut on_song: F,
) -> Aggregation
where
    F: FnMut(usize, &SongDetail),
{
    let mut aggregation = Aggregation::default();

    for (index, title) in titles.iter().enumerate() {
        let lookup = fetch_lyrics(provider, artist, title).await;
        let word_count = count_words(&lookup.text);

        let detail = SongDetail {
            title: title.clone(),
            word_count,
            lyrics_found: lookup.found,
        };
        on_song(index, &detail);

        aggregation.details.push(detail);
        aggregation.all_word_counts.push(word_count);
        if lookup.found {
            aggregation.found_word_counts.push(word_count);
        }

        cooldown.wait().await;
    }

    aggregation
}
