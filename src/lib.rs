//! Running Playlist Curator Library
//!
//! This library builds a running playlist on Spotify. Tracks are gathered from
//! the albums of followed artists, the saved library and every other visible
//! playlist, deduplicated, filtered against two ban playlists and an
//! audio-feature heuristic, ranked by fuzzed popularity and finally written to
//! the destination playlist.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the trigger server
//! - `cli` - Command-line interface implementations
//! - `config` - Environment loading and typed settings
//! - `curation` - Aggregation, ban filtering, classification, ranking and writing
//! - `error` - The crate error type
//! - `server` - Local HTTP server that triggers a curation run
//! - `spotify` - Rate-limited, paginated Spotify Web API client
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use stridecli::{config, curation};
//!
//! #[tokio::main]
//! async fn main() -> stridecli::Res<()> {
//!     config::load_env().await?;
//!     let settings = config::Settings::from_env()?;
//!     let count = curation::curate(&settings, false).await?;
//!     println!("{count} tracks written");
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod curation;
pub mod error;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::CurateError;

/// A convenient Result type alias for operations that may fail.
///
/// Every fallible operation in the crate reports a [`CurateError`], so callers
/// can propagate with `?` across the client, the pipeline and the entrypoints.
pub type Res<T> = std::result::Result<T, CurateError>;

/// Prints an informational message with a blue bullet point.
///
/// Used for general progress output such as outbound requests and pipeline
/// stage summaries.
///
/// # Example
///
/// ```
/// info!("fetching {}", url);
/// info!("{} tracks after deduplication", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Wrote {} tracks to the running playlist", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only the binary uses this macro. Library code returns a [`CurateError`]
/// instead so the HTTP trigger can report failures without terminating.
///
/// # Example
///
/// ```
/// error!("Cannot load settings. Err: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable anomalies: throttling, tracks without audio features,
/// failed feature chunks and similar conditions that shrink the working set
/// without aborting the run.
///
/// # Example
///
/// ```
/// warning!("No audio features for {}", track);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
