//! Title deduplication for recording listings.

use std::collections::HashSet;

use crate::models::Recording;

/// Distinct recording titles in order of first appearance.
///
/// Titles are compared byte for byte: no case folding, no whitespace trimming.
pub fn distinct_titles(recordings: &[Recording]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(recordings.len());
    let mut titles = Vec::new();

    for recording in recordings {
        if seen.insert(recording.title.as_str()) {
            titles.push(recording.title.clone());
        }
    }

    titles
}
