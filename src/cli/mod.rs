//! # CLI Module
//!
//! Command implementations behind the `stridecli` binary. Each command loads
//! nothing itself: `main` reads the settings and hands them over.
//!
//! ## Commands
//!
//! - [`curate`] - Runs one curation pass. `--test` reads a single followed
//!   artist; `--dry-run` prints the ranked tracks as a table instead of
//!   rewriting the playlist.
//! - [`serve`] - Starts the HTTP trigger server.
//!
//! ## Usage Patterns
//!
//! ```bash
//! stridecli curate                 # Rewrite the running playlist
//! stridecli curate --test          # Smoke test with one followed artist
//! stridecli curate --dry-run       # Preview the ranking
//! stridecli serve                  # GET / triggers a run
//! ```
//!
//! Fatal errors are reported with the `error!` macro, which exits the process.

mod curate;
mod serve;

pub use curate::curate;
pub use serve::serve;
