//! Terminal output helpers for the command-line tool.
//!
//! Colored status lines, a lyrics progress bar and the per-song table.

use comfy_table::{Attribute, Cell, CellAlignment, Table};
use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::models::{SongDetail, SummaryResult};

/// Get the current terminal width.
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(100)
}

/// Check if stdout is a terminal.
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Search,
}

/// Status icons for different operations.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Error => "✗",
        Status::Warning => "⚠",
        Status::Search => "🔍",
    }
}

/// Format a status message.
///
/// With `color` set the message gets a colored icon prefix, otherwise it is returned
/// unchanged so piped output stays plain.
pub fn status_line(status: Status, msg: &str, color: bool) -> String {
    if !color {
        return msg.to_string();
    }
    let icon = status_icon(status);
    match status {
        Status::Success => format!("{} {}", icon.green().bold(), msg),
        Status::Error => format!("{} {}", icon.red().bold(), msg),
        Status::Warning => format!("{} {}", icon.yellow().bold(), msg),
        Status::Search => format!("{} {}", icon.yellow(), msg),
    }
}

/// Format a mean word count for display.
pub fn format_mean(value: f64) -> String {
    format!("{:.2}", value)
}

/// Truncate text to fit within the specified width using unicode-aware truncation.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width <= 3 {
        return "...".to_string();
    }

    let total_width: usize = text
        .chars()
        .map(|c| unicode_width::UnicodeWidthChar::width(c).unwrap_or(1))
        .sum();

    if total_width <= max_width {
        return text.to_string();
    }

    let mut current_width = 0;
    let mut truncated = String::new();

    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(1);
        if current_width + w > max_width - 3 {
            break;
        }
        current_width += w;
        truncated.push(c);
    }

    format!("{}...", truncated)
}

/// The summary lines printed at the end of a run
pub fn summary_lines(summary: &SummaryResult) -> Vec<String> {
    vec![
        format!("found lyrics for {} songs", summary.count_found),
        format!(
            "mean number of words of all songs: {}",
            format_mean(summary.mean_all_songs)
        ),
        format!(
            "mean number of words of found songs: {}",
            format_mean(summary.mean_found_songs)
        ),
    ]
}

/// Build a table of per-song word counts.
pub fn songs_table(songs: &[SongDetail]) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["#", "Title", "Words", "Lyrics"]);

    let title_width = terminal_width().saturating_sub(30).clamp(20, 60);

    for (index, song) in songs.iter().enumerate() {
        let found = if song.lyrics_found { "found" } else { "missing" };
        table.add_row(vec![
            Cell::new(index + 1).set_alignment(CellAlignment::Right),
            Cell::new(truncate_with_ellipsis(&song.title, title_width))
                .add_attribute(Attribute::Bold),
            Cell::new(song.word_count).set_alignment(CellAlignment::Right),
            Cell::new(found),
        ]);
    }

    table
}

/// Progress bar for lyrics lookups
pub struct LyricsProgress {
    pb: indicatif::ProgressBar,
}

impl LyricsProgress {
    /// Create a progress bar for `total` titles, hidden unless `visible`.
    pub fn new(total: usize, visible: bool) -> Self {
        let pb = if visible {
            indicatif::ProgressBar::new(total as u64)
        } else {
            indicatif::ProgressBar::hidden()
        };

        if let Ok(style) = indicatif::ProgressStyle::with_template(
            "{spinner:.cyan} {bar:40.cyan/blue} {pos}/{len} {msg}",
        ) {
            pb.set_style(style.progress_chars("█▓▒░ "));
        }

        Self { pb }
    }

    /// Record one finished title
    pub fn song_done(&self, song: &SongDetail) {
        self.pb.set_message(truncate_with_ellipsis(&song.title, 40));
        self.pb.inc(1);
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}
