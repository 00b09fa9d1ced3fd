//! Artist resolution and recording enumeration.

use crate::models::{ArtistMatch, Recording};
use crate::sources::ArtistCatalog;
use crate::utils::Cooldown;

/// Resolve a free-text artist name to the catalog's first candidate.
///
/// Any failure (transport, status, body) yields [`ArtistMatch::none`]; it is logged
/// but never propagated.
pub async fn resolve_artist(catalog: &dyn ArtistCatalog, name: &str) -> ArtistMatch {
    match catalog.search_artist(name).await {
        Ok(artist) => {
            tracing::debug!(
                artist = %name,
                matched = %artist.matched_name,
                score = artist.confidence,
                "Artist search finished"
            );
            artist
        }
        Err(e) => {
            tracing::warn!(
                catalog = catalog.id(),
                "Artist search on {} failed for '{}': {}",
                catalog.name(),
                name,
                e
            );
            ArtistMatch::none()
        }
    }
}

/// List every recording of an artist, one page at a time.
///
/// Pages are requested at offsets `0, page_size, 2 * page_size, ...` while
/// `offset + page_size` is below the total the catalog reports. `cooldown` is waited
/// out before every page except the first. A failed page ends the listing and the
/// recordings gathered so far are returned.
pub async fn enumerate_recordings(
    catalog: &dyn ArtistCatalog,
    artist_id: &str,
    page_size: usize,
    cooldown: Cooldown,
) -> Vec<Recording> {
    let page_size = page_size.max(1);
    let mut recordings = Vec::new();
    let mut offset = 0;

    loop {
        let page = match catalog.recording_page(artist_id, offset, page_size).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(
                    catalog = catalog.id(),
                    offset,
                    "Recording listing on {} stopped early: {}",
                    catalog.name(),
                    e
                );
                break;
            }
        };

        if page.offset != offset {
            tracing::debug!(
                requested = offset,
                returned = page.offset,
                "Catalog answered with a different page offset"
            );
        }
        tracing::debug!(
            offset,
            received = page.recordings.len(),
            total = page.total_count,
            "Received recording page"
        );
        recordings.extend(page.recordings);

        if offset + page_size >= page.total_count {
            break;
        }

        offset += page_size;
        cooldown.wait().await;
    }

    recordings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::MockCatalog;
    use std::time::Duration;

    fn titles(recordings: &[Recording]) -> Vec<&str> {
        recordings.iter().map(|r| r.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_resolve_artist_success() {
        let catalog = MockCatalog::new();
        catalog.set_artist(ArtistMatch::new("abc", 100, "Nova Twins"));

        let artist = resolve_artist(&catalog, "nova twins").await;
        assert_eq!(artist.identifier, "abc");
        assert_eq!(artist.confidence, 100);
        assert_eq!(artist.matched_name, "Nova Twins");
    }

    #[tokio::test]
    async fn test_resolve_artist_failure_is_no_match() {
        let catalog = MockCatalog::new();
        let artist = resolve_artist(&catalog, "bad_response").await;
        assert_eq!(artist, ArtistMatch::none());
    }

    #[tokio::test]
    async fn test_single_page() {
        let catalog = MockCatalog::new();
        catalog.set_recordings(&["Ivory Tower", "Vortex"], 100);

        let recordings = enumerate_recordings(&catalog, "id", 100, Cooldown::none()).await;

        assert_eq!(titles(&recordings), vec!["Ivory Tower", "Vortex"]);
        assert_eq!(catalog.requested_offsets(), vec![0]);
    }

    #[tokio::test]
    async fn test_multiple_pages_in_order() {
        let catalog = MockCatalog::new();
        catalog.set_recordings(&["Ivory Tower", "Vortex", "Enemy", "Cleopatra"], 2);

        let recordings = enumerate_recordings(&catalog, "id", 2, Cooldown::none()).await;

        assert_eq!(
            titles(&recordings),
            vec!["Ivory Tower", "Vortex", "Enemy", "Cleopatra"]
        );
        assert_eq!(catalog.requested_offsets(), vec![0, 2]);
    }

    #[tokio::test]
    async fn test_request_count_is_ceil_of_total_over_page_size() {
        let names: Vec<String> = (0..7).map(|i| format!("Song {}", i)).collect();
        let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();

        let catalog = MockCatalog::new();
        catalog.set_recordings(&refs, 3);

        let recordings = enumerate_recordings(&catalog, "id", 3, Cooldown::none()).await;

        assert_eq!(recordings.len(), 7);
        assert_eq!(catalog.requested_offsets(), vec![0, 3, 6]);
    }

    #[tokio::test]
    async fn test_failed_page_returns_earlier_pages() {
        let catalog = MockCatalog::new();
        catalog.set_recordings(&["A", "B", "C", "D", "E", "F"], 2);
        catalog.fail_page(4);

        let recordings = enumerate_recordings(&catalog, "id", 2, Cooldown::none()).await;

        assert_eq!(titles(&recordings), vec!["A", "B", "C", "D"]);
        assert_eq!(catalog.requested_offsets(), vec![0, 2, 4]);
    }

    #[tokio::test]
    async fn test_failed_first_page_returns_nothing() {
        let catalog = MockCatalog::new();
        let recordings = enumerate_recordings(&catalog, "id", 100, Cooldown::none()).await;
        assert!(recordings.is_empty());
        assert_eq!(catalog.requested_offsets(), vec![0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cooldown_only_between_pages() {
        let catalog = MockCatalog::new();
        catalog.set_recordings(&["A", "B", "C", "D", "E"], 2);

        let start = tokio::time::Instant::now();
        let cooldown = Cooldown::from_millis(2000);
        enumerate_recordings(&catalog, "id", 2, cooldown).await;

        let times = catalog.request_times();
        assert_eq!(times.len(), 3);
        // No wait before the first page
        assert!(times[0] - start < Duration::from_millis(1));
        assert!(times[1] - times[0] >= Duration::from_millis(2000));
        assert!(times[2] - times[1] >= Duration::from_millis(2000));
        // Nor after the last one
        assert!(start.elapsed() < Duration::from_millis(4100));
    }
}
