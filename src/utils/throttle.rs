//! Fixed courtesy delays between upstream requests.
//!
//! Neither MusicBrainz nor lyrics.ovh publishes a hard limit we can negotiate, so the
//! pipeline simply pauses for a fixed time between requests. This is not backoff: the
//! delay never grows and failed requests are not retried.

use std::time::Duration;

/// A fixed pause applied between requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cooldown {
    delay: Duration,
}

impl Cooldown {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// No pause at all
    pub fn none() -> Self {
        Self::default()
    }

    /// Sleep for the configured delay
    pub async fn wait(&self) {
        if self.delay.is_zero() {
            return;
        }
        tracing::trace!("Cooling down for {:?}", self.delay);
        tokio::time::sleep(self.delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_wait_sleeps_for_delay() {
        let cooldown = Cooldown::from_millis(1500);
        let start = Instant::now();
        cooldown.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_none_does_not_sleep() {
        let start = Instant::now();
        Cooldown::none().wait().await;
        assert!(start.elapsed() < Duration::from_millis(1));
    }
}
