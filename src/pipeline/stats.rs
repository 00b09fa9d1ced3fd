//! Mean word counts.

use crate::models::SummaryResult;

use super::Aggregation;

/// Errors raised while summarizing word counts
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    #[error("Cannot compute the mean of an empty sample")]
    EmptySample,
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[usize]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let total: usize = values.iter().sum();
    Some(total as f64 / values.len() as f64)
}

/// Summarize an aggregation.
///
/// The all-songs mean requires at least one title; the found-songs mean falls back to
/// `0.0` when no lyrics were found.
pub fn summarize(aggregation: &Aggregation) -> Result<SummaryResult, StatsError> {
    let mean_all_songs = mean(&aggregation.all_word_counts).ok_or(StatsError::EmptySample)?;
    let mean_found_songs = mean(&aggregation.found_word_counts).unwrap_or(0.0);

    Ok(SummaryResult {
        mean_all_songs,
        mean_found_songs,
        count_found: aggregation.count_found(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregation(all: Vec<usize>, found: Vec<usize>) -> Aggregation {
        Aggregation {
            details: Vec::new(),
            all_word_counts: all,
            found_word_counts: found,
        }
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[8, 0, 4]), Some(4.0));
        assert_eq!(mean(&[1, 2]), Some(1.5));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_summarize_two_of_three_found() {
        let summary = summarize(&aggregation(vec![8, 0, 4], vec![8, 4])).unwrap();
        assert_eq!(summary.mean_all_songs, 4.0);
        assert_eq!(summary.mean_found_songs, 6.0);
        assert_eq!(summary.count_found, 2);
    }

    #[test]
    fn test_summarize_nothing_found() {
        let summary = summarize(&aggregation(vec![0, 0], vec![])).unwrap();
        assert_eq!(summary.mean_all_songs, 0.0);
        assert_eq!(summary.mean_found_songs, 0.0);
        assert_eq!(summary.count_found, 0);
    }

    #[test]
    fn test_summarize_empty_fails() {
        let result = summarize(&aggregation(vec![], vec![]));
        assert_eq!(result, Err(StatsError::EmptySample));
    }
}
