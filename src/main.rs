use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use lyric_stats::config::{find_config_file, load_config, Config};
use lyric_stats::pipeline::{LyricStats, PipelineEvent, RunOutcome};
use lyric_stats::ui::{self, LyricsProgress, Status};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Lyric Stats - Find the average number of words in songs by an artist
#[derive(Parser, Debug)]
#[command(name = "lyric-stats")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find average number of words in songs by an artist", long_about = None)]
struct Cli {
    /// The artist to search for
    #[arg(long, short, required_unless_present_any = ["env", "show_config"])]
    artist: Option<String>,

    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress progress output and non-error logs
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Plain)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Request timeout in seconds (overrides the configuration)
    #[arg(long)]
    timeout: Option<u64>,

    /// Recordings requested per catalog page (overrides the configuration)
    #[arg(long)]
    page_size: Option<usize>,

    /// Show all environment variables
    #[arg(long)]
    env: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    show_config: bool,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Progress and summary lines
    Plain,
    /// Plain output followed by a per-song table
    Table,
    /// JSON report on stdout, progress on stderr
    Json,
}

/// Print all available environment variables
fn print_env_vars() {
    println!("Lyric Stats - Environment Variables");
    println!();
    println!("Catalog (MusicBrainz):");
    println!("  LYRIC_STATS_CATALOG__BASE_URL          Base URL (default: https://musicbrainz.org/ws/2)");
    println!("  LYRIC_STATS_CATALOG__PAGE_SIZE         Recordings per page (default: 100)");
    println!("  LYRIC_STATS_CATALOG__PAGE_COOLDOWN_MS  Pause between pages in ms (default: 2000)");
    println!();
    println!("Lyrics (lyrics.ovh):");
    println!("  LYRIC_STATS_LYRICS__BASE_URL           Base URL (default: https://api.lyrics.ovh/v1)");
    println!("  LYRIC_STATS_LYRICS__COOLDOWN_MS        Pause after each song in ms (default: 1000)");
    println!();
    println!("HTTP:");
    println!("  LYRIC_STATS_HTTP__TIMEOUT_SECS         Request timeout (default: 30)");
    println!("  LYRIC_STATS_HTTP__CONNECT_TIMEOUT_SECS Connect timeout (default: 10)");
    println!("  LYRIC_STATS_HTTP__USER_AGENT           User agent sent to both services");
    println!();
    println!("Logging:");
    println!("  LYRIC_STATS_LOGGING__LEVEL             Log level (default: info)");
    println!("  LYRIC_STATS_LOGGING__FORMAT            Set to \"json\" for structured logs");
    println!("  RUST_LOG                               Overrides the log filter entirely");
    println!();
    println!("Example:");
    println!("  export LYRIC_STATS_CATALOG__PAGE_COOLDOWN_MS=\"1000\"");
    println!("  lyric-stats --artist \"Nova Twins\"");
}

/// Load the configuration file, environment and CLI overrides
fn resolve_config(cli: &Cli) -> Result<Config> {
    let path = cli.config.clone().or_else(find_config_file);
    let mut config = load_config(path.as_deref())
        .with_context(|| match &path {
            Some(p) => format!("Failed to load configuration from {}", p.display()),
            None => "Failed to load configuration".to_string(),
        })?;

    if let Some(timeout) = cli.timeout {
        config.http.timeout_secs = timeout;
    }
    if let Some(page_size) = cli.page_size {
        config.catalog.page_size = page_size;
    }
    config.validate()?;

    Ok(config)
}

fn init_tracing(cli: &Cli, config: &Config) {
    let log_level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let level = if cli.quiet { "error" } else { log_level };

    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("lyric_stats={}", level)),
    );

    if config.logging.is_json() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Where progress lines go: stdout normally, stderr when stdout carries JSON
struct Console {
    to_stderr: bool,
    quiet: bool,
    color: bool,
}

impl Console {
    /// Print a result line, even in quiet mode
    fn line(&self, msg: &str) {
        if self.to_stderr {
            eprintln!("{}", msg);
        } else {
            println!("{}", msg);
        }
    }

    fn status(&self, status: Status, msg: &str) {
        self.line(&ui::status_line(status, msg, self.color));
    }

    /// Print a progress line, skipped in quiet mode
    fn progress(&self, msg: &str) {
        if !self.quiet {
            self.line(msg);
        }
    }

    fn progress_status(&self, status: Status, msg: &str) {
        if !self.quiet {
            self.status(status, msg);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Show environment variables and exit if requested
    if cli.env {
        print_env_vars();
        return Ok(());
    }

    let config = resolve_config(&cli)?;

    if cli.show_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    init_tracing(&cli, &config);

    let artist = cli
        .artist
        .clone()
        .context("an artist name is required (--artist)")?;

    let stats = LyricStats::from_config(&config).context("Failed to create HTTP clients")?;

    let json = cli.output == OutputFormat::Json;
    let console = Console {
        to_stderr: json,
        quiet: cli.quiet,
        color: !json && ui::is_terminal(),
    };
    let show_progress = !cli.quiet && ui::is_terminal();
    let mut progress: Option<LyricsProgress> = None;

    console.progress(&format!("artist searching for is {}", artist));

    let outcome = stats
        .run_with(&artist, |event| match event {
            PipelineEvent::ArtistResolved(found) if found.is_match() => {
                console.progress_status(
                    Status::Success,
                    &format!(
                        "found artist {} with a score of {}",
                        found.matched_name, found.confidence
                    ),
                );
            }
            PipelineEvent::ArtistResolved(_) => {}
            PipelineEvent::RecordingsListed { count } => {
                console.progress(&format!("found {} total recordings", count));
            }
            PipelineEvent::TitlesDeduplicated { count } => {
                console.progress(&format!("found {} distinct titles", count));
            }
            PipelineEvent::LyricsStarted { total } => {
                console.progress_status(
                    Status::Search,
                    "retrieving lyrics. This may take some time...",
                );
                progress = Some(LyricsProgress::new(total, show_progress));
            }
            PipelineEvent::SongCompleted { song, .. } => {
                if let Some(bar) = &progress {
                    bar.song_done(song);
                }
            }
        })
        .await?;

    if let Some(bar) = &progress {
        bar.finish();
    }

    match &outcome {
        RunOutcome::NoArtistMatch => {
            console.status(Status::Error, "could not find a good match. Exiting");
        }
        RunOutcome::NoTitles { .. } => {
            console.status(Status::Error, "Could not find any titles. Exiting");
        }
        RunOutcome::Completed(report) => {
            if report.summary.count_found == 0 {
                console.status(Status::Warning, "Could not find any lyrics for artist");
            }
            console.line("");
            for line in ui::summary_lines(&report.summary) {
                console.line(&line);
            }

            if cli.output == OutputFormat::Table {
                println!();
                println!("{}", ui::songs_table(&report.songs));
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    Ok(())
}
