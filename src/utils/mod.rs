//! Utility modules supporting the lyrics pipeline.
//!
//! - [`distinct_titles`]: Deduplicate recording titles, keeping first-seen order
//! - [`HttpClient`]: Shared HTTP client configured from the `[http]` section
//! - [`Cooldown`]: Fixed courtesy delay between upstream requests
//!
//! # Deduplication
//!
//! ```rust
//! use lyric_stats::models::Recording;
//! use lyric_stats::utils::distinct_titles;
//!
//! let recordings = vec![
//!     Recording::titled("Antagonist"),
//!     Recording::titled("Taxman"),
//!     Recording::titled("Antagonist"),
//! ];
//! assert_eq!(distinct_titles(&recordings), vec!["Antagonist", "Taxman"]);
//! ```

mod dedup;
mod http;
mod throttle;

pub use dedup::distinct_titles;
pub use http::HttpClient;
pub use throttle::Cooldown;
